use ::rand::prelude::*;

use crate::common::types::Timestamp;
use crate::common::Labels;
use crate::data::{Field, Frame, FrameType};
use crate::series::{LongSeries, MultiFrameSeries, WideFrameSeries};

pub fn create_rng(seed: Option<u64>) -> Result<StdRng, String> {
    if let Some(seed) = seed {
        Ok(StdRng::seed_from_u64(seed))
    } else {
        match StdRng::from_rng(thread_rng()) {
            Err(e) => Err(format!("Error constructing rng {:?}", e)),
            Ok(rng) => Ok(rng),
        }
    }
}

/// A grid of metrics: every metric name is sampled for every host at every timestamp.
#[derive(Debug, Clone)]
pub struct MetricGrid {
    pub timestamps: Vec<Timestamp>,
    pub names: Vec<String>,
    pub hosts: Vec<String>,
    /// values[name_idx][host_idx][time_idx]
    pub values: Vec<Vec<Vec<f64>>>,
}

impl MetricGrid {
    pub fn random(rng: &mut StdRng, names: usize, hosts: usize, samples: usize) -> Self {
        let start: Timestamp = rng.gen_range(1_600_000_000_000..1_700_000_000_000);
        let mut ts = start;
        let timestamps = (0..samples)
            .map(|_| {
                ts += rng.gen_range(1000..20000);
                ts
            })
            .collect();
        let values = (0..names)
            .map(|_| {
                (0..hosts)
                    .map(|_| (0..samples).map(|_| rng.gen_range(0.0..100.0)).collect())
                    .collect()
            })
            .collect();
        Self {
            timestamps,
            names: (0..names).map(|i| format!("metric_{i}")).collect(),
            hosts: (0..hosts).map(|i| format!("host_{i}")).collect(),
            values,
        }
    }

    pub fn labels(&self, host_idx: usize) -> Labels {
        Labels::from_pairs([("host", self.hosts[host_idx].as_str())])
    }

    pub fn multi(&self) -> MultiFrameSeries {
        let mut series = MultiFrameSeries::new();
        for (n, name) in self.names.iter().enumerate() {
            for h in 0..self.hosts.len() {
                series
                    .add_metric(
                        name.as_str(),
                        self.labels(h),
                        self.timestamps.clone(),
                        self.values[n][h].clone(),
                    )
                    .unwrap();
            }
        }
        series
    }

    pub fn wide(&self) -> WideFrameSeries {
        let mut series = WideFrameSeries::new();
        series.set_time("time", self.timestamps.clone()).unwrap();
        for (n, name) in self.names.iter().enumerate() {
            for h in 0..self.hosts.len() {
                series
                    .add_metric(name.as_str(), self.labels(h), self.values[n][h].clone())
                    .unwrap();
            }
        }
        series
    }

    /// One row per (timestamp, host), with one value column per metric name.
    pub fn long(&self) -> LongSeries {
        let rows = self.timestamps.len() * self.hosts.len();
        let mut times = Vec::with_capacity(rows);
        let mut hosts = Vec::with_capacity(rows);
        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(rows); self.names.len()];
        for (t, ts) in self.timestamps.iter().enumerate() {
            for (h, host) in self.hosts.iter().enumerate() {
                times.push(*ts);
                hosts.push(host.clone());
                for (n, column) in columns.iter_mut().enumerate() {
                    column.push(self.values[n][h][t]);
                }
            }
        }
        let mut fields = vec![Field::time("time", times)];
        for (name, column) in self.names.iter().zip(columns) {
            fields.push(Field::new(name.as_str(), Labels::new(), column));
        }
        fields.push(Field::new("host", Labels::new(), hosts));
        LongSeries::from_frame(Frame::new("", fields).with_type(FrameType::TimeSeriesLong))
    }
}
