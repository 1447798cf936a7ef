//! Per-side combat state: hp and one-turn status flags.

use bitflags::bitflags;

bitflags! {
    /// One-turn status flags carried by a combatant.
    ///
    /// - `STUNNED`: the side cannot pick during the next turn
    /// - `HASTE`: the side wins initiative at the next initiative decision
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusFlags: u8 {
        const STUNNED = 1 << 0;
        const HASTE = 1 << 1;
    }
}

/// Hp and status of one side.
///
/// Hp is clamped to `[0, max_hp]` by every mutating method, so the invariant
/// holds after each individual effect rather than being restored afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    hp: i32,
    max_hp: i32,
    status: StatusFlags,
}

impl CombatantState {
    /// Fresh combatant at full hp with no status.
    pub fn new(max_hp: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            hp: max_hp,
            max_hp,
            status: StatusFlags::empty(),
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn status(&self) -> StatusFlags {
        self.status
    }

    pub fn is_stunned(&self) -> bool {
        self.status.contains(StatusFlags::STUNNED)
    }

    pub fn has_haste(&self) -> bool {
        self.status.contains(StatusFlags::HASTE)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Subtract `amount` hp, clamped at 0. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(saturate(amount)).max(0);
        before - self.hp
    }

    /// Add `amount` hp, clamped at `max_hp`. Returns the hp actually gained.
    pub fn heal(&mut self, amount: u32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(saturate(amount)).min(self.max_hp);
        self.hp - before
    }

    pub fn set_stunned(&mut self, stunned: bool) {
        self.status.set(StatusFlags::STUNNED, stunned);
    }

    pub fn set_haste(&mut self, haste: bool) {
        self.status.set(StatusFlags::HASTE, haste);
    }

    /// Overwrite hp with an authoritative value, clamped to `[0, max_hp]`.
    ///
    /// Used by peers that mirror a remote authority instead of resolving
    /// turns themselves.
    pub fn sync_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    /// Back to full hp with no status.
    pub fn reset(&mut self) {
        *self = Self::new(self.max_hp);
    }
}

fn saturate(amount: u32) -> i32 {
    i32::try_from(amount).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero() {
        let mut state = CombatantState::new(20);
        assert_eq!(state.take_damage(6), 6);
        assert_eq!(state.hp(), 14);
        assert_eq!(state.take_damage(100), 14);
        assert_eq!(state.hp(), 0);
        assert!(state.is_defeated());
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut state = CombatantState::new(20);
        state.take_damage(3);
        assert_eq!(state.heal(4), 3);
        assert_eq!(state.hp(), 20);
    }

    #[test]
    fn huge_values_saturate() {
        let mut state = CombatantState::new(20);
        state.take_damage(u32::MAX);
        assert_eq!(state.hp(), 0);
        state.heal(u32::MAX);
        assert_eq!(state.hp(), 20);
    }

    #[test]
    fn status_flags_toggle_independently() {
        let mut state = CombatantState::new(20);
        state.set_stunned(true);
        state.set_haste(true);
        assert_eq!(state.status(), StatusFlags::STUNNED | StatusFlags::HASTE);
        state.set_stunned(false);
        assert!(!state.is_stunned());
        assert!(state.has_haste());
        state.reset();
        assert_eq!(state.status(), StatusFlags::empty());
    }

    #[test]
    fn sync_hp_clamps() {
        let mut state = CombatantState::new(20);
        state.sync_hp(25);
        assert_eq!(state.hp(), 20);
        state.sync_hp(-3);
        assert_eq!(state.hp(), 0);
    }
}
