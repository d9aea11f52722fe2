mod activation;
mod property;
mod reduce;
