pub mod assessment;
pub mod models;
pub mod recommendation;
