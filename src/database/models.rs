use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct DbCollection {
    pub collection_id: String,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionGameRow {
    pub collection_id: String,
    pub game_id: String,
}
