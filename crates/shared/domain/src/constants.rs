//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Courses
// =============================================================================

/// Seats offered by a course when no capacity is given
pub const DEFAULT_COURSE_CAPACITY: i32 = 30;

/// Smallest allowed credit count
pub const MIN_COURSE_CREDITS: i32 = 1;

/// Largest allowed credit count
pub const MAX_COURSE_CREDITS: i32 = 6;

/// Smallest allowed course capacity
pub const MIN_COURSE_CAPACITY: i32 = 1;

// =============================================================================
// Enrollments
// =============================================================================

/// Status of an enrollment that currently holds a seat
pub const STATUS_ACTIVE: &str = "active";

/// Status of an enrollment whose course has finished
pub const STATUS_COMPLETED: &str = "completed";

/// Status of an enrollment the student left
pub const STATUS_DROPPED: &str = "dropped";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum username length requirement
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length requirement
pub const MAX_USERNAME_LENGTH: usize = 32;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
