#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod content_tests;

#[cfg(test)]
mod reference_tests;

#[cfg(test)]
mod submit_create_tests;

#[cfg(test)]
mod submit_update_tests;
