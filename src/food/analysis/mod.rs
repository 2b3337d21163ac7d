pub mod diet;

pub use diet::{recommend, DietProfile, DietRecommendation};
