//! Domain Models

pub mod menu_item;
pub mod order;
pub mod user;

pub use menu_item::{MenuItem, MenuItemCreate, MenuItemSnapshot, MenuItemUpdate};
pub use order::{
    Order, OrderCreate, OrderItemsUpdate, OrderLine, OrderStatus, OrderStatusUpdate, VersionedRequest,
};
pub use user::{AccessToken, LoginRequest, RegisterRequest, User, UserProfile, UserRole, UserUpdate};
