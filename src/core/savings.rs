use crate::models::CostModel;

/// Estimate the monthly saving of buying from a local farmer (0 or more)
///
/// Cost formula:
/// wholesale = wholesale_price_per_kg * volume + wholesale_freight_per_km * wholesale_reference_km
/// local     = local_price_per_kg * volume + local_freight_per_km * distance_km
/// saving    = max(0, wholesale - local)
///
/// The wholesale leg always uses the flat reference distance; only the
/// local leg depends on the farmer's actual distance.
pub fn estimate_saving(distance_km: f64, model: &CostModel) -> f64 {
    let wholesale = wholesale_cost(model);
    let local = local_cost(distance_km, model);

    (wholesale - local).max(0.0)
}

#[inline]
fn wholesale_cost(model: &CostModel) -> f64 {
    model.wholesale_price_per_kg * model.monthly_volume_kg
        + model.wholesale_freight_per_km * model.wholesale_reference_km
}

#[inline]
fn local_cost(distance_km: f64, model: &CostModel) -> f64 {
    model.local_price_per_kg * model.monthly_volume_kg + model.local_freight_per_km * distance_km
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_saving() {
        // 3.50 * 500 + 0.80 * 50 - 2.50 * 500 = 540
        let saving = estimate_saving(12.0, &CostModel::default());
        assert!((saving - 540.0).abs() < 1e-9);
    }

    #[test]
    fn test_saving_independent_of_distance_without_local_freight() {
        let model = CostModel::default();
        assert_eq!(estimate_saving(0.5, &model), estimate_saving(95.0, &model));
    }

    #[test]
    fn test_local_freight_reduces_saving() {
        let model = CostModel { local_freight_per_km: 1.0, ..CostModel::default() };
        let near = estimate_saving(10.0, &model);
        let far = estimate_saving(100.0, &model);
        assert!(near > far);
        assert!((near - 530.0).abs() < 1e-9);
    }

    #[test]
    fn test_saving_never_negative() {
        let model = CostModel {
            local_price_per_kg: 10.0,
            ..CostModel::default()
        };
        assert_eq!(estimate_saving(5.0, &model), 0.0);
    }
}
