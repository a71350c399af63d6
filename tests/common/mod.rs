use pinty::aggregator::PintyAggregator;
use pinty::bin_state::BinContext;
use pinty::observation::Observation;
use pinty::selector::AggregationResult;

/// Drive a full spatial + temporal cycle for one bin.
///
/// `periods` holds, for each period in order, the raw observations falling into the bin.
pub fn run_bin(
    agg: &PintyAggregator,
    ctx: &mut BinContext,
    periods: &[Vec<Observation>],
) -> AggregationResult {
    agg.init_temporal(ctx);
    for observations in periods {
        let mut candidate = agg.init_spatial();
        for obs in observations {
            agg.aggregate_spatial(&mut candidate, obs);
        }
        agg.complete_spatial(&mut candidate, observations.len());
        agg.aggregate_temporal(ctx, &candidate, observations.len())
            .unwrap();
    }
    agg.complete_temporal(ctx, periods.len()).unwrap()
}

pub fn assert_empty_result(result: &AggregationResult) {
    assert_eq!(result.count, 0);
    assert!(result.value.is_nan());
    assert!(result.time.is_nan());
    assert!(result.sigma.is_nan());
}
