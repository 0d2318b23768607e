pub mod ask;
pub mod health_check_route;
pub mod prompt_info_route;
pub mod status_route;
