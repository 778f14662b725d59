//! Team setup: the editable roster behind the setup screen and the
//! validation that turns it into players.

use serde::{Deserialize, Serialize};

use crate::avatars::{default_avatar_for_slot, icon_for};
use crate::constants::{DEFAULT_TEAM_NAME, MAX_PLAYERS};
use crate::error::SetupError;
use crate::state::Player;

/// One line of the setup form. The name may still be blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupEntry {
    pub name: String,
    pub avatar_id: String,
}

impl SetupEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, avatar_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar_id: avatar_id.into(),
        }
    }

    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Drop blank entries and build the starting players.
///
/// # Errors
///
/// Returns [`SetupError::NoNamedPlayers`] when every name is blank and
/// [`SetupError::TooManyPlayers`] when more than [`MAX_PLAYERS`] are named.
pub fn players_from_entries(entries: &[SetupEntry]) -> Result<Vec<Player>, SetupError> {
    let named: Vec<&SetupEntry> = entries.iter().filter(|e| e.is_named()).collect();
    if named.is_empty() {
        return Err(SetupError::NoNamedPlayers);
    }
    if named.len() > MAX_PLAYERS {
        return Err(SetupError::TooManyPlayers { count: named.len() });
    }
    Ok(named
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| Player {
            id: format!("p-{idx}"),
            name: entry.name.trim().to_string(),
            avatar_id: entry.avatar_id.clone(),
            avatar_icon: icon_for(&entry.avatar_id).to_string(),
            position: 0,
            leaves: 0,
        })
        .collect())
}

/// Editable team form. Always holds between one and [`MAX_PLAYERS`] slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub team_name: String,
    slots: Vec<SetupEntry>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            team_name: DEFAULT_TEAM_NAME.to_string(),
            slots: vec![SetupEntry::new("", default_avatar_for_slot(0).id)],
        }
    }
}

impl Roster {
    #[must_use]
    pub fn slots(&self) -> &[SetupEntry] {
        &self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= MAX_PLAYERS
    }

    /// Append a blank slot with the next catalog avatar. Returns `false` when full.
    pub fn add_slot(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        let avatar = default_avatar_for_slot(self.slots.len());
        self.slots.push(SetupEntry::new("", avatar.id));
        true
    }

    /// Remove a slot. The last remaining slot cannot be removed.
    pub fn remove_slot(&mut self, slot: usize) -> bool {
        if self.slots.len() <= 1 || slot >= self.slots.len() {
            return false;
        }
        self.slots.remove(slot);
        true
    }

    pub fn set_name(&mut self, slot: usize, name: impl Into<String>) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                entry.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Give `slot` its own avatar. Each explorer picks for themselves.
    pub fn claim_avatar(&mut self, slot: usize, avatar_id: impl Into<String>) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                entry.avatar_id = avatar_id.into();
                true
            }
            None => false,
        }
    }

    /// Whether any slot has claimed `avatar_id`.
    #[must_use]
    pub fn is_claimed(&self, avatar_id: &str) -> bool {
        self.slots.iter().any(|e| e.avatar_id == avatar_id)
    }

    #[must_use]
    pub fn can_start(&self) -> bool {
        self.slots.iter().any(SetupEntry::is_named)
    }

    /// Team name to display, falling back to the default when left blank.
    #[must_use]
    pub fn display_team_name(&self) -> String {
        let trimmed = self.team_name.trim();
        if trimmed.is_empty() {
            DEFAULT_TEAM_NAME.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_AVATAR_ICON;

    #[test]
    fn blank_names_are_filtered_and_ids_follow_order() {
        let entries = vec![
            SetupEntry::new("  ", "beaver"),
            SetupEntry::new(" Maple ", "moose"),
            SetupEntry::new("Jasper", "loon"),
        ];
        let players = players_from_entries(&entries).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id, "p-0");
        assert_eq!(players[0].name, "Maple");
        assert_eq!(players[0].avatar_icon, "🫎");
        assert_eq!(players[1].id, "p-1");
        assert!(players.iter().all(|p| p.position == 0 && p.leaves == 0));
    }

    #[test]
    fn all_blank_entries_are_rejected() {
        let entries = vec![SetupEntry::new("", "beaver"), SetupEntry::new("\t", "moose")];
        assert_eq!(
            players_from_entries(&entries),
            Err(SetupError::NoNamedPlayers)
        );
        assert_eq!(players_from_entries(&[]), Err(SetupError::NoNamedPlayers));
    }

    #[test]
    fn oversized_teams_are_rejected() {
        let entries: Vec<_> = (0..5)
            .map(|i| SetupEntry::new(format!("Explorer {i}"), "goose"))
            .collect();
        assert_eq!(
            players_from_entries(&entries),
            Err(SetupError::TooManyPlayers { count: 5 })
        );
    }

    #[test]
    fn unknown_avatar_gets_maple_leaf() {
        let players = players_from_entries(&[SetupEntry::new("Toronto", "narwhal")]).unwrap();
        assert_eq!(players[0].avatar_icon, DEFAULT_AVATAR_ICON);
        assert_eq!(players[0].avatar_id, "narwhal");
    }

    #[test]
    fn roster_keeps_between_one_and_four_slots() {
        let mut roster = Roster::default();
        assert_eq!(roster.len(), 1);
        assert!(!roster.remove_slot(0));
        assert!(roster.add_slot());
        assert!(roster.add_slot());
        assert!(roster.add_slot());
        assert!(roster.is_full());
        assert!(!roster.add_slot());
        assert_eq!(roster.len(), MAX_PLAYERS);
        assert_eq!(roster.slots()[3].avatar_id, "loon");
        assert!(roster.remove_slot(1));
        assert_eq!(roster.len(), 3);
        assert!(!roster.remove_slot(7));
    }

    #[test]
    fn each_slot_claims_its_own_avatar() {
        let mut roster = Roster::default();
        roster.add_slot();
        assert!(roster.claim_avatar(0, "raccoon"));
        assert_eq!(roster.slots()[0].avatar_id, "raccoon");
        assert_eq!(roster.slots()[1].avatar_id, "moose");
        assert!(roster.is_claimed("raccoon"));
        assert!(!roster.is_claimed("beaver"));
        assert!(!roster.claim_avatar(5, "goose"));
    }

    #[test]
    fn roster_can_start_once_someone_is_named() {
        let mut roster = Roster::default();
        assert!(!roster.can_start());
        roster.set_name(0, "Maple");
        assert!(roster.can_start());
    }

    #[test]
    fn blank_team_name_falls_back_to_default() {
        let mut roster = Roster::default();
        roster.team_name = "   ".into();
        assert_eq!(roster.display_team_name(), DEFAULT_TEAM_NAME);
        roster.team_name = "Loon Squad".into();
        assert_eq!(roster.display_team_name(), "Loon Squad");
    }
}
