//! Engine-wide tuning constants.

/// Rooms placed per generated level.
pub const ROOM_COUNT: usize = 8;

/// Levels per generated terrain.
pub const LEVEL_COUNT: usize = 3;

/// Enemies seeded per room when a level is inhabited.
///
/// Spawning is currently disabled; the seeding machinery is kept so a
/// nonzero count works without further changes.
pub const ENEMIES_PER_ROOM: usize = 0;

/// Maximum number of entries kept in the message log.
pub const LOG_CAP: usize = 5;
