use super::scale::VerticalSpan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnAssignment {
    /// Lane index per input span, in input order.
    pub lanes: Vec<usize>,
    pub lane_count: usize,
}

/// First-fit lane assignment over spans sorted by ascending start year.
///
/// Each lane remembers the `y0` of the last span placed in it. A span may
/// join lane `j` when its bottom clears that top by more than `node_gap`.
pub(crate) fn pack_columns(spans: &[VerticalSpan], node_gap: f64) -> ColumnAssignment {
    let mut columns: Vec<f64> = Vec::new();
    let mut lanes = Vec::with_capacity(spans.len());

    for span in spans {
        let free = columns
            .iter()
            .position(|&lane_top| span.y1 < lane_top - node_gap);
        let lane = match free {
            Some(lane) => {
                columns[lane] = span.y0;
                lane
            }
            None => {
                columns.push(span.y0);
                columns.len() - 1
            }
        };
        lanes.push(lane);
    }

    ColumnAssignment {
        lanes,
        lane_count: columns.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::scale::TimeScale;

    fn spans(ranges: &[(f64, f64)]) -> Vec<VerticalSpan> {
        let scale = TimeScale::new(1000.0, 1100.0, 50.0, 1250.0);
        ranges
            .iter()
            .map(|&(start, finish)| VerticalSpan::new(&scale, start, finish))
            .collect()
    }

    #[test]
    fn overlapping_ranges_take_separate_lanes() {
        let packed = pack_columns(&spans(&[(1000.0, 1050.0), (1040.0, 1100.0)]), 4.0);
        assert_eq!(packed.lanes, vec![0, 1]);
        assert_eq!(packed.lane_count, 2);
    }

    #[test]
    fn sequential_ranges_reuse_first_lane() {
        let packed = pack_columns(
            &spans(&[(1000.0, 1020.0), (1010.0, 1030.0), (1040.0, 1060.0), (1045.0, 1090.0)]),
            4.0,
        );
        assert_eq!(packed.lanes, vec![0, 1, 0, 1]);
        assert_eq!(packed.lane_count, 2);
    }

    #[test]
    fn gap_is_respected_even_without_year_overlap() {
        // 1 year is 10px here; touching ranges fall inside the 4px gap.
        let packed = pack_columns(&spans(&[(1000.0, 1020.0), (1020.0, 1040.0)]), 4.0);
        assert_eq!(packed.lane_count, 2);
        let packed = pack_columns(&spans(&[(1000.0, 1020.0), (1021.0, 1040.0)]), 4.0);
        assert_eq!(packed.lane_count, 1);
    }

    #[test]
    fn lanes_never_overlap_and_stay_time_ordered() {
        let ranges: Vec<(f64, f64)> = (0..40)
            .map(|i| {
                let start = 1000.0 + (i * 7 % 90) as f64;
                (start, (start + 5.0 + (i % 6) as f64 * 4.0).min(1100.0))
            })
            .collect();
        let mut ranges = ranges;
        ranges.sort_by(|a, b| a.0.total_cmp(&b.0));
        let spans = spans(&ranges);
        let gap = 4.0;
        let packed = pack_columns(&spans, gap);

        for lane in 0..packed.lane_count {
            let members: Vec<usize> = (0..spans.len())
                .filter(|&i| packed.lanes[i] == lane)
                .collect();
            for pair in members.windows(2) {
                let (prev, next) = (spans[pair[0]], spans[pair[1]]);
                assert!(ranges[pair[0]].0 <= ranges[pair[1]].0);
                assert!(next.y1 < prev.y0 - gap);
            }
        }
    }

    #[test]
    fn empty_input_opens_no_lanes() {
        let packed = pack_columns(&[], 4.0);
        assert_eq!(packed.lane_count, 0);
        assert!(packed.lanes.is_empty());
    }
}
