//! Propulsion math: Tsiolkovsky delta-v, multi-stage accumulation, mass flow,
//! thrust-to-weight, and burn time.

pub const G0: f64 = 9.80665;

/// Tsiolkovsky rocket equation: `dv = Isp * g0 * ln(m_wet / m_dry)`.
///
/// Returns 0 when `m_dry <= 0` or `m_wet <= m_dry` rather than producing a
/// negative or infinite result.
pub fn delta_v(isp: f64, m_wet: f64, m_dry: f64) -> f64 {
    if m_dry <= 0.0 || m_wet <= m_dry {
        return 0.0;
    }
    isp * G0 * (m_wet / m_dry).ln()
}

/// One stage's contribution to multi-stage delta-v: `(wet, dry)` masses for
/// this stage with everything above it folded into `payload_above`.
pub fn stage_delta_v(isp: f64, stage_wet: f64, stage_dry: f64, payload_above: f64) -> f64 {
    delta_v(isp, stage_wet + payload_above, stage_dry + payload_above)
}

/// Total delta-v for an ordered list of `(isp, wet, dry)` stages, bottom-up
/// (index 0 fires first). Each stage carries every stage above it as payload.
pub fn multi_stage_delta_v(stages: &[(f64, f64, f64)]) -> f64 {
    let mut total = 0.0;
    for i in 0..stages.len() {
        let payload_above: f64 = stages[i + 1..].iter().map(|(_, wet, _)| wet).sum();
        let (isp, wet, dry) = stages[i];
        total += stage_delta_v(isp, wet, dry, payload_above);
    }
    total
}

/// Propellant mass flow rate: `mdot = F / (Isp * g0)`. Zero when Isp <= 0.
pub fn mass_flow_rate(thrust: f64, isp: f64) -> f64 {
    if isp <= 0.0 {
        return 0.0;
    }
    thrust / (isp * G0)
}

/// Thrust-to-weight ratio at local gravity `g_local`. Zero when `mass <= 0`.
pub fn thrust_to_weight(thrust: f64, mass: f64, g_local: f64) -> f64 {
    if mass <= 0.0 {
        return 0.0;
    }
    thrust / (mass * g_local)
}

/// Burn time for a given fuel load and mass flow rate. Zero when
/// `mass_flow <= 0`.
pub fn burn_time(fuel_mass: f64, mass_flow: f64) -> f64 {
    if mass_flow <= 0.0 {
        return 0.0;
    }
    fuel_mass / mass_flow
}
