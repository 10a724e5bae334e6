use rand::Rng;

const ID_PREFIX: &str = "player_";

// Formats the registry key for the n-th connection
pub fn player_id(sequence: u64) -> String {
    format!("{}{}", ID_PREFIX, sequence)
}

// Derives the default display name from the numeric suffix of a player id
pub fn display_name(player_id: &str) -> String {
    let suffix = player_id
        .rsplit('_')
        .next()
        .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(player_id);
    format!("Player {}", suffix)
}

// Generate a random display color, uniform over all 24-bit values
pub fn generate_color() -> String {
    let value: u32 = rand::thread_rng().gen_range(0..0x100_0000);
    format!("#{:06x}", value)
}
