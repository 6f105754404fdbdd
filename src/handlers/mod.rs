// handlers/mod.rs - Route handlers
//
// health: public liveness check
// posts: blog post CRUD, mounted behind the store and JWT middleware
pub mod health;
pub mod posts;
