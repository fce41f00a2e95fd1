// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route Prefix: /api/v1/datas/*
// Middleware: jwt_auth_middleware, which injects AuthUser
pub mod datas;
