//! Running session score.

use aerocombat_core::state::ScoreView;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    /// Enemies destroyed by projectiles or rams. Culled enemies don't count.
    pub kills: u32,
    pub deaths: u32,
    /// Player shots that actually spawned a projectile.
    pub shots_fired: u32,
    pub enemies_spawned: u32,
}

impl ScoreState {
    pub fn view(&self) -> ScoreView {
        ScoreView {
            kills: self.kills,
            deaths: self.deaths,
            shots_fired: self.shots_fired,
            enemies_spawned: self.enemies_spawned,
        }
    }
}
