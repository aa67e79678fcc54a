use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

/// Numeric features fed to the clusterer, in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["duration", "budget", "imdb_score", "title_year", "gross"];

pub const FEATURE_COUNT: usize = 5;

/// Standardized (duration, budget, imdb_score, title_year, gross) of one record
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Raw feature values of a record, `None` where the dataset had no value
fn raw_features(record: &MovieRecord) -> [Option<f64>; FEATURE_COUNT] {
    [
        record.duration,
        record.budget,
        record.imdb_score,
        record.title_year.map(f64::from),
        record.gross,
    ]
}

/// Median of the given values, `None` for an empty slice
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Replaces missing entries with the median of the present ones
///
/// Returns `None` when the column has no present value at all.
pub fn impute_median(column: &[Option<f64>]) -> Option<(Vec<f64>, f64)> {
    let present: Vec<f64> = column.iter().flatten().copied().collect();
    let fill = median(&present)?;
    let filled = column.iter().map(|v| v.unwrap_or(fill)).collect();
    Some((filled, fill))
}

/// Rescales a column in place to zero mean and unit (population) variance
///
/// A constant column has zero variance; it is only centred.
pub fn standardize(column: &mut [f64]) -> (f64, f64) {
    if column.is_empty() {
        return (0.0, 1.0);
    }

    let n = column.len() as f64;
    let mean = column.iter().sum::<f64>() / n;
    let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();
    let scale = if std > 0.0 { std } else { 1.0 };

    for value in column.iter_mut() {
        *value = (*value - mean) / scale;
    }

    (mean, std)
}

/// Builds the standardized feature matrix for the whole dataset
///
/// Missing values are median-imputed per feature before the mean and standard
/// deviation are computed, so the statistics describe the imputed column.
pub fn prepare_features(records: &[MovieRecord]) -> AppResult<Vec<FeatureVector>> {
    let raw: Vec<[Option<f64>; FEATURE_COUNT]> = records.iter().map(raw_features).collect();
    let mut features = vec![[0.0; FEATURE_COUNT]; records.len()];

    for (feature, name) in FEATURE_NAMES.iter().enumerate() {
        let column: Vec<Option<f64>> = raw.iter().map(|row| row[feature]).collect();
        let missing = column.iter().filter(|v| v.is_none()).count();

        let (mut values, fill) = impute_median(&column).ok_or_else(|| {
            AppError::Clustering(format!("feature '{}' has no values to cluster on", name))
        })?;
        let (mean, std) = standardize(&mut values);

        tracing::debug!(
            feature = %name,
            missing,
            median = fill,
            mean,
            std,
            "Feature imputed and standardized"
        );

        for (row, value) in features.iter_mut().zip(values) {
            row[feature] = value;
        }
    }

    Ok(features)
}
