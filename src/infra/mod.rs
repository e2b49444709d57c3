pub mod factory;
pub mod mailer;
pub mod repositories;
