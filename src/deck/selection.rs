use crate::deck::SelectionError;

/// Most lessons a single series may expand to.
pub const MAX_SERIES_LEN: usize = 10_000;

/// Expands a lesson series such as `1:3,5,8:6` into `[1, 2, 3, 5, 8, 7, 6]`.
///
/// - `n` selects one lesson, `n,m` lists lessons
/// - `n:m` is an inclusive range, descending when `n > m`
/// - chained ranges `a:b:c` continue from `b` without repeating it
///
/// A series expanding to more than [`MAX_SERIES_LEN`] lessons is refused.
pub fn parse_lesson_series(series: &str) -> Result<Vec<u32>, SelectionError> {
    if !is_well_formed(series) {
        return Err(SelectionError::InvalidSeries(series.to_string()));
    }

    let mut lessons = Vec::new();
    for group in series.split(',') {
        let bounds = group
            .split(':')
            .map(|n| n.parse::<u32>())
            .collect::<Result<Vec<u32>, _>>()
            .map_err(|_| SelectionError::InvalidSeries(series.to_string()))?;

        if let [single] = bounds.as_slice() {
            if lessons.len() >= MAX_SERIES_LEN {
                return Err(too_long(series));
            }
            lessons.push(*single);
            continue;
        }

        for (k, pair) in bounds.windows(2).enumerate() {
            let (mut from, to) = (pair[0], pair[1]);
            if from == to {
                continue;
            }
            // The previous range already emitted `from`.
            if k >= 1 {
                if from > to {
                    from -= 1;
                } else {
                    from += 1;
                }
            }
            let span = from.abs_diff(to) as usize + 1;
            if lessons.len() + span > MAX_SERIES_LEN {
                return Err(too_long(series));
            }
            if from > to {
                lessons.extend((to..=from).rev());
            } else {
                lessons.extend(from..=to);
            }
        }
    }
    Ok(lessons)
}

fn too_long(series: &str) -> SelectionError {
    SelectionError::SeriesTooLong {
        series: series.to_string(),
        max: MAX_SERIES_LEN,
    }
}

/// Digits separated by single `,` or `:`, starting and ending with a digit.
fn is_well_formed(series: &str) -> bool {
    let mut previous_was_digit = false;
    for ch in series.chars() {
        match ch {
            '0'..='9' => previous_was_digit = true,
            ',' | ':' if previous_was_digit => previous_was_digit = false,
            _ => return false,
        }
    }
    previous_was_digit
}
