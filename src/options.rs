//! Option setters
//!
//! Options are addressed by case-insensitive name, the way saved files and
//! scripts refer to them. Names without a dedicated field are kept in the
//! `extras` map of the variable (or of the shared options) so nothing read
//! from a file is silently dropped.

use crate::error::{Result, TplotError};
use crate::store::VariableStore;
use crate::types::{AxisScale, OptionValue, PlotOptions};

/// Set one option on a stored variable
pub fn set_option(
    store: &mut VariableStore,
    variable: &str,
    option: &str,
    value: OptionValue,
) -> Result<()> {
    let var = store
        .get_mut(variable)
        .ok_or_else(|| TplotError::UnknownVariable(variable.to_string()))?;
    apply_option(&mut var.options, option, value)
}

/// Set one option on a [`PlotOptions`] record
pub fn apply_option(opts: &mut PlotOptions, option: &str, value: OptionValue) -> Result<()> {
    let key = option.to_ascii_lowercase();
    match key.as_str() {
        "ytitle" | "name" => opts.y.label = Some(text(&key, &value)?),
        "ysubtitle" => opts.y.subtitle = Some(text(&key, &value)?),
        "ztitle" => opts.z.label = Some(text(&key, &value)?),
        "ylog" => opts.y.scale = AxisScale::from_flag(flag(&key, &value)?),
        "zlog" => opts.z.scale = AxisScale::from_flag(flag(&key, &value)?),
        "yrange" => opts.y.range = Some(pair(&key, &value)?),
        "zrange" => opts.z.range = Some(pair(&key, &value)?),
        "spec" => opts.spec = flag(&key, &value)?,
        "legend_names" | "labels" => opts.legend_names = texts(&key, &value)?,
        "color" | "colors" => opts.color = Some(value),
        "panel_size" => opts.panel_size = Some(number(&key, &value)?),
        "xlog_interactive" => opts.interactive_x.scale = AxisScale::from_flag(flag(&key, &value)?),
        "ylog_interactive" => opts.interactive_y.scale = AxisScale::from_flag(flag(&key, &value)?),
        "xrange_interactive" => opts.interactive_x.range = Some(pair(&key, &value)?),
        "yrange_interactive" => opts.interactive_y.range = Some(pair(&key, &value)?),
        _ => {
            tracing::debug!("Keeping option '{}' = {} as extra", key, value);
            opts.extras.insert(key, value);
        }
    }
    Ok(())
}

/// Set one option on the shared (all-panel) options
pub fn set_shared_option(
    store: &mut VariableStore,
    option: &str,
    value: OptionValue,
) -> Result<()> {
    let key = option.to_ascii_lowercase();
    let shared = store.shared_options_mut();
    match key.as_str() {
        "title" => shared.title = Some(text(&key, &value)?),
        "wsize" => shared.window_size = Some(window_size(&key, &value)?),
        "x_range" | "trange" => shared.x_range = Some(pair(&key, &value)?),
        "var_label" => shared.var_label = texts(&key, &value)?,
        _ => {
            tracing::debug!("Keeping shared option '{}' = {} as extra", key, value);
            shared.extras.insert(key, value);
        }
    }
    Ok(())
}

fn text(option: &str, value: &OptionValue) -> Result<String> {
    value
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| TplotError::invalid_option(option, format!("expected text, got {}", value)))
}

fn texts(option: &str, value: &OptionValue) -> Result<Vec<String>> {
    value.as_texts().ok_or_else(|| {
        TplotError::invalid_option(option, format!("expected text list, got {}", value))
    })
}

fn flag(option: &str, value: &OptionValue) -> Result<bool> {
    value.as_bool().ok_or_else(|| {
        TplotError::invalid_option(option, format!("expected a flag, got {}", value))
    })
}

fn number(option: &str, value: &OptionValue) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        TplotError::invalid_option(option, format!("expected a number, got {}", value))
    })
}

fn pair(option: &str, value: &OptionValue) -> Result<[f64; 2]> {
    value.as_pair().ok_or_else(|| {
        TplotError::invalid_option(option, format!("expected two numbers, got {}", value))
    })
}

fn window_size(option: &str, value: &OptionValue) -> Result<[u32; 2]> {
    let [w, h] = pair(option, value)?;
    let to_px = |v: f64| {
        if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 {
            Ok(v as u32)
        } else {
            Err(TplotError::invalid_option(
                option,
                format!("{} is not a pixel size", v),
            ))
        }
    };
    Ok([to_px(w)?, to_px(h)?])
}
