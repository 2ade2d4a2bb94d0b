pub mod generate_recommendation;
