mod common;
mod presentation;
