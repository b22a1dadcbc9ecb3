#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    CurrentAssets,
    FixedAssets,
    CurrentLiabilities,
    FixedLiabilities,
    NetEquity,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::CurrentAssets,
        Bucket::FixedAssets,
        Bucket::CurrentLiabilities,
        Bucket::FixedLiabilities,
        Bucket::NetEquity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Bucket::CurrentAssets => "流動資産",
            Bucket::FixedAssets => "固定資産",
            Bucket::CurrentLiabilities => "流動負債",
            Bucket::FixedLiabilities => "固定負債",
            Bucket::NetEquity => "純資産",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Bucket::CurrentAssets => "#a0c4ff",
            Bucket::FixedAssets => "#8ecae6",
            Bucket::CurrentLiabilities => "#ffd6a5",
            Bucket::FixedLiabilities => "#ffb347",
            Bucket::NetEquity => "#b2d8d8",
        }
    }

    pub fn stack(self) -> StackCategory {
        match self {
            Bucket::CurrentAssets | Bucket::FixedAssets => StackCategory::Assets,
            _ => StackCategory::LiabilitiesAndEquity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackCategory {
    Assets,
    LiabilitiesAndEquity,
}

impl StackCategory {
    pub fn label(self) -> &'static str {
        match self {
            StackCategory::Assets => "資産",
            StackCategory::LiabilitiesAndEquity => "負債・純資産",
        }
    }

    /// Bottom-to-top drawing order of the stack.
    pub fn buckets(self) -> &'static [Bucket] {
        match self {
            StackCategory::Assets => &[Bucket::FixedAssets, Bucket::CurrentAssets],
            StackCategory::LiabilitiesAndEquity => &[
                Bucket::NetEquity,
                Bucket::FixedLiabilities,
                Bucket::CurrentLiabilities,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailItem {
    pub name: String,
    pub value: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub bucket: Bucket,
    pub amount: f64,
    pub percentage: f64,
    pub details: Vec<DetailItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackDatum {
    pub category: StackCategory,
    pub total: f64,
    /// Bottom-to-top, as given by [`StackCategory::buckets`].
    pub segments: Vec<Segment>,
}

impl StackDatum {
    #[cfg(test)]
    pub fn segment(&self, bucket: Bucket) -> Option<&Segment> {
        self.segments.iter().find(|s| s.bucket == bucket)
    }

    #[cfg(test)]
    pub fn percentage_sum(&self) -> f64 {
        self.segments.iter().map(|s| s.percentage).sum()
    }

    pub fn has_details(&self) -> bool {
        self.segments.iter().any(|s| !s.details.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearChart {
    pub year: String,
    pub assets: StackDatum,
    pub liabilities_and_equity: StackDatum,
}

impl YearChart {
    pub fn stacks(&self) -> [&StackDatum; 2] {
        [&self.assets, &self.liabilities_and_equity]
    }
}
