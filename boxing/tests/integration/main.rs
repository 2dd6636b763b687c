mod concurrency;
mod numbers;
mod properties;
mod unboxing;
mod user_types;
