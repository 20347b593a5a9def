//! Categories module - domain models, services, and traits.

mod categories_constants;
mod categories_errors;
mod categories_model;
mod categories_service;
mod categories_service_tests;
mod categories_traits;

pub use categories_constants::*;
pub use categories_errors::CategoryError;
pub use categories_model::{
    Category, CategoryType, CategoryUpdate, CategoryWithSubcategories, NewCategory,
};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
