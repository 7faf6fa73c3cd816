//! Per-resource API services.
//!
//! Each service wraps a slice of the Pluvo REST surface and is obtained
//! from [`PluvoClient`](crate::PluvoClient) method calls. Services are
//! cheap to create; they share the client's connection pool and
//! configuration.

mod courses;
mod media;
mod organisations;
mod users;

pub use courses::CoursesService;
pub use media::MediaService;
pub use organisations::OrganisationsService;
pub use users::UsersService;
