pub use super::car::Entity as Car;
pub use super::car_driver::Entity as CarDriver;
pub use super::driver::Entity as Driver;
pub use super::manufacturer::Entity as Manufacturer;
pub use super::session::Entity as Session;
