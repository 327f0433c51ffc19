//! License tier resolution from fleet controller count and redundancy.

use dcsize_core::{AddOn, AddOnKind, LicenseDecision, LicenseOutcome, LicensePricing, LicenseTier};
use smallvec::smallvec;

/// Largest controller count (inclusive) covered by the special tier.
pub const SPECIAL_TIER_MAX_CONTROLLERS: u32 = 32;

/// Maps total controllers and the redundancy flag to a license tier.
///
/// Redundancy always selects the global tier with gateway and redundancy
/// add-ons; otherwise the controller count picks special or corporate,
/// both of which are priced into the controllers.
pub fn resolve(
    total_controllers: u32,
    redundancy: bool,
    pricing: &LicensePricing,
) -> LicenseOutcome {
    if total_controllers == 0 {
        tracing::info!("no controllers configured, nothing to license");
        return LicenseOutcome::NotApplicable;
    }

    let decision = if redundancy {
        let add_ons = smallvec![
            AddOn {
                kind: AddOnKind::Gateway,
                cost: pricing.gateway,
            },
            AddOn {
                kind: AddOnKind::Redundancy,
                cost: pricing.redundancy,
            },
        ];
        LicenseDecision {
            tier: LicenseTier::Global,
            redundancy,
            total_controllers,
            total_license_cost: pricing.gateway + pricing.redundancy,
            add_ons,
        }
    } else {
        let tier = if total_controllers <= SPECIAL_TIER_MAX_CONTROLLERS {
            LicenseTier::Special
        } else {
            LicenseTier::Corporate
        };
        LicenseDecision {
            tier,
            redundancy,
            total_controllers,
            add_ons: smallvec![],
            total_license_cost: 0,
        }
    };

    tracing::info!(
        total_controllers,
        redundancy,
        tier = %decision.tier,
        cost = decision.total_license_cost,
        "license resolved"
    );
    LicenseOutcome::Licensed(decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(total: u32, redundancy: bool) -> LicenseTier {
        resolve(total, redundancy, &LicensePricing::default())
            .decision()
            .map(|d| d.tier)
            .unwrap()
    }

    #[test]
    fn zero_controllers_not_applicable() {
        assert_eq!(
            resolve(0, false, &LicensePricing::default()),
            LicenseOutcome::NotApplicable
        );
        assert_eq!(
            resolve(0, true, &LicensePricing::default()),
            LicenseOutcome::NotApplicable
        );
    }

    #[test]
    fn threshold_is_inclusive_on_special() {
        assert_eq!(tier(1, false), LicenseTier::Special);
        assert_eq!(tier(32, false), LicenseTier::Special);
        assert_eq!(tier(33, false), LicenseTier::Corporate);
    }

    #[test]
    fn non_redundant_tiers_are_free() {
        for total in [5, 40] {
            let outcome = resolve(total, false, &LicensePricing::default());
            let d = outcome.decision().unwrap();
            assert!(d.add_ons.is_empty());
            assert_eq!(d.total_license_cost, 0);
        }
    }

    #[test]
    fn redundancy_overrides_count() {
        for total in [1, 32, 33, 500] {
            let outcome = resolve(total, true, &LicensePricing::default());
            let d = outcome.decision().unwrap();
            assert_eq!(d.tier, LicenseTier::Global);
            let kinds: Vec<_> = d.add_ons.iter().map(|a| a.kind).collect();
            assert_eq!(kinds, vec![AddOnKind::Gateway, AddOnKind::Redundancy]);
            assert_eq!(d.total_license_cost, 1250);
        }
    }

    #[test]
    fn custom_pricing_flows_into_total() {
        let pricing = LicensePricing {
            gateway: 100,
            redundancy: 20,
        };
        let outcome = resolve(3, true, &pricing);
        assert_eq!(outcome.decision().unwrap().total_license_cost, 120);
    }
}
