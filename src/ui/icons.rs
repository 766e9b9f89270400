pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const WARN: &str = "⚠";
    pub const INFO: &str = "ℹ️";
    pub const ARROW: &str = "→";
    pub const PACKAGE: &str = "📦";
    pub const DATABASE: &str = "🗄️";
    pub const MAG: &str = "🔎";
    pub const STATS: &str = "📊";
}
