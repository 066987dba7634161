pub mod config;
pub mod error;
pub mod helpers;
pub mod render;

pub mod handlers {
    pub mod quiz_handler;
    pub mod timer_handler;
}

pub mod models {
    pub mod communication;
    pub mod question;
    pub mod session;
    pub mod snapshot;
}

pub mod loggers {
    pub mod file_logger;
}
