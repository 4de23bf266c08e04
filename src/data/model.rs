use serde::Serialize;

// ---------------------------------------------------------------------------
// ReynoldsBlock – one ZONE of the source file
// ---------------------------------------------------------------------------

/// All polar rows recorded at a single Reynolds number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReynoldsBlock {
    pub reynolds_number: f64,
    /// Legend label, e.g. `Re = 5×10^5`.
    pub label: String,
    /// `(angle, lift coefficient)` pairs in file order.
    pub aoa_cl: Vec<(f64, f64)>,
    /// `(angle, drag coefficient)` pairs in file order – same angles as `aoa_cl`.
    pub aoa_cd: Vec<(f64, f64)>,
}

impl ReynoldsBlock {
    pub fn new(reynolds_number: f64, label: impl Into<String>) -> Self {
        Self {
            reynolds_number,
            label: label.into(),
            aoa_cl: Vec::new(),
            aoa_cd: Vec::new(),
        }
    }

    /// Number of rows in the block.
    pub fn len(&self) -> usize {
        self.aoa_cl.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aoa_cl.is_empty()
    }

    /// `(aoa, cl, cd)` triples sorted by angle of attack, ready for plotting.
    ///
    /// The block itself keeps file order; this returns a sorted copy.
    pub fn sorted_series(&self) -> Vec<(f64, f64, f64)> {
        let mut rows: Vec<(f64, f64, f64)> = self
            .aoa_cl
            .iter()
            .zip(self.aoa_cd.iter())
            .map(|(&(aoa, cl), &(_, cd))| (aoa, cl, cd))
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        rows
    }
}

// ---------------------------------------------------------------------------
// PolarDataset – the complete parsed file
// ---------------------------------------------------------------------------

/// A parsed polar file: blocks in the order their zones appear.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PolarDataset {
    /// Text of the file's `TITLE` line, if any.
    pub title: Option<String>,
    pub blocks: Vec<ReynoldsBlock>,
}

impl PolarDataset {
    /// Number of Reynolds blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of data rows across every block.
    pub fn row_count(&self) -> usize {
        self.blocks.iter().map(ReynoldsBlock::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_series_orders_by_angle_and_keeps_pairs() {
        let mut block = ReynoldsBlock::new(5e5, "Re = 5×10^5");
        block.aoa_cl = vec![(4.0, 0.9), (-2.0, 0.1), (0.0, 0.4)];
        block.aoa_cd = vec![(4.0, 0.02), (-2.0, 0.011), (0.0, 0.01)];

        let series = block.sorted_series();
        assert_eq!(
            series,
            vec![(-2.0, 0.1, 0.011), (0.0, 0.4, 0.01), (4.0, 0.9, 0.02)]
        );
        // stored order untouched
        assert_eq!(block.aoa_cl[0], (4.0, 0.9));
    }

    #[test]
    fn row_count_sums_blocks() {
        let mut a = ReynoldsBlock::new(1e6, "a");
        a.aoa_cl = vec![(0.0, 0.5), (2.0, 0.7)];
        a.aoa_cd = vec![(0.0, 0.01), (2.0, 0.012)];
        let b = ReynoldsBlock::new(2e6, "b");

        let dataset = PolarDataset {
            title: None,
            blocks: vec![a, b],
        };
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.row_count(), 2);
        assert!(dataset.blocks[1].is_empty());
    }
}
