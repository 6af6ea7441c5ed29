pub mod prelude;

pub mod car;
pub mod car_driver;
pub mod driver;
pub mod manufacturer;
pub mod session;
