pub mod health;
pub mod theme;
