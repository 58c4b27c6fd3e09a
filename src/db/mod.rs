pub mod comments;
pub mod issues;
pub mod notifications;
pub mod projects;
pub mod search;
pub mod sessions;
pub mod teams;
pub mod users;
pub mod wiki_pages;
