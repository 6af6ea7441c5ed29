use crate::modules::common::dto::NavUser;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct IndexPage {
    pub user: NavUser,
    pub num_drivers: u64,
    pub num_cars: u64,
    pub num_manufacturers: u64,

    /// home page visits within the current session, this one included
    pub num_visits: i32,
}
