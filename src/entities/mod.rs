//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod advertiser;
pub mod choices;
pub mod city;
pub mod coupon;
pub mod deal;
pub mod email_subscription;
pub mod product_category;
pub mod profile;
pub mod user;

// Re-export specific types to avoid conflicts
pub use advertiser::{Column as AdvertiserColumn, Entity as Advertiser, Model as AdvertiserModel};
pub use choices::{CardType, CouponStatus, Province, Weekday};
pub use city::{Column as CityColumn, Entity as City, Model as CityModel};
pub use coupon::{Column as CouponColumn, Entity as Coupon, Model as CouponModel};
pub use deal::{Column as DealColumn, Entity as Deal, Model as DealModel};
pub use email_subscription::{
    Column as EmailSubscriptionColumn, Entity as EmailSubscription,
    Model as EmailSubscriptionModel,
};
pub use product_category::{
    Column as ProductCategoryColumn, Entity as ProductCategory, Model as ProductCategoryModel,
};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
