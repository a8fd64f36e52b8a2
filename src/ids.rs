use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Van,
    Technician,
    Job,
    Client,
    InventoryItem,
    Notification,
}

impl EntityKind {
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Van => "van",
            EntityKind::Technician => "tech",
            EntityKind::Job => "job",
            EntityKind::Client => "client",
            EntityKind::InventoryItem => "item",
            EntityKind::Notification => "notif",
        }
    }

    pub fn new_id(self) -> String {
        generate_id(self.prefix())
    }
}

/// `{prefix}_{unix millis}_{9 base-36 chars}`. Collisions are unlikely but
/// not ruled out, and the value must not be used as a secret.
pub fn generate_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    format!("{prefix}_{}_{suffix}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{generate_id, EntityKind};

    #[test]
    fn ten_thousand_ids_do_not_collide() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_id("job")).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn id_has_prefix_timestamp_and_suffix() {
        let id = EntityKind::Technician.new_id();
        let parts: Vec<&str> = id.split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "tech");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
