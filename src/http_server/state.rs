use std::sync::Arc;

use crate::database::Database;

pub struct AppState {
    pub db: Arc<Database>,
}
