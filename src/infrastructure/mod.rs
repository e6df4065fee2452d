pub mod auth;
pub mod db;
pub mod repositories;
pub mod storage;
