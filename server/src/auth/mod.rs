//! Authentication and per-account authorization
//!
//! * [`password`]: bcrypt credential hashing
//! * [`jwt`]: token issuing and verification
//! * [`middleware`]: the access guard for `/account/:id`

pub mod jwt;
pub mod middleware;
pub mod password;
