//! Lua scripts for owner-checked lock operations

/// Deletes the lock only when the stored value matches the caller's owner value
pub const RELEASE_LOCK: &str = r#"
    if redis.call('get', KEYS[1]) == ARGV[1] then
        return redis.call('del', KEYS[1])
    end
    return 0
"#;

/// Refreshes the expiration only when the stored value matches the caller's owner value
pub const EXTEND_LOCK: &str = r#"
    if redis.call('get', KEYS[1]) == ARGV[1] then
        return redis.call('expire', KEYS[1], ARGV[2])
    end
    return 0
"#;
