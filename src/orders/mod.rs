mod builder;

pub use builder::OrderBuilder;
