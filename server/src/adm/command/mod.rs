pub mod add_user;
pub mod seed;
pub mod set_role;
