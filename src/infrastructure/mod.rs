pub mod clock;
pub mod hotel_data;
pub mod llm;
pub mod observability;
pub mod persistence;
