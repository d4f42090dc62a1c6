pub mod current_user;
pub mod json_body;
pub mod list_params;
pub mod resource_id;

pub use current_user::AuthUser;
pub use json_body::JsonBody;
pub use list_params::ListParams;
pub use resource_id::ResourceId;
