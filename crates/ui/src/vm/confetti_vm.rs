use std::time::Duration;

use rand::Rng;

pub const CONFETTI_COLORS: [&str; 5] = ["#4CAF50", "#8BC34A", "#CDDC39", "#FFC107", "#FF9800"];
pub const CONFETTI_COUNT: usize = 20;
/// Max travel from the origin on each axis, in px.
pub const CONFETTI_SPREAD: f64 = 200.0;
/// Delay before particles move, so the browser paints the start position first.
pub const CONFETTI_LAUNCH_DELAY: Duration = Duration::from_millis(10);
/// Time from spawn to removal. Matches the CSS transition length.
pub const CONFETTI_LIFETIME: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiParticle {
    pub color: &'static str,
    pub dx: f64,
    pub dy: f64,
}

impl ConfettiParticle {
    /// Inline style before (`launched == false`) and after launch.
    #[must_use]
    pub fn style(&self, launched: bool) -> String {
        let (opacity, transform) = if launched {
            ("1", format!("translate({:.1}px, {:.1}px)", self.dx, self.dy))
        } else {
            ("0", "translate(-50%, -50%)".to_string())
        };
        format!(
            "position: absolute; width: 10px; height: 10px; border-radius: 50%; \
             top: 50%; left: 50%; background-color: {}; opacity: {opacity}; \
             transform: {transform}; transition: all 2s ease-out;",
            self.color
        )
    }
}

/// One celebration's worth of particles.
pub fn confetti_burst<R: Rng>(rng: &mut R) -> Vec<ConfettiParticle> {
    (0..CONFETTI_COUNT)
        .map(|_| ConfettiParticle {
            color: CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())],
            dx: rng.random_range(-CONFETTI_SPREAD..CONFETTI_SPREAD),
            dy: rng.random_range(-CONFETTI_SPREAD..CONFETTI_SPREAD),
        })
        .collect()
}
