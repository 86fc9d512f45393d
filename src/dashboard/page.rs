//! Self-contained HTML page holding every rendered chart.

use crate::dashboard::orchestrator::Dashboard;
use crate::error::Result;
use crate::render::svg::escape;
use crate::utils::constants::{
    BAR_TOOLTIP_OFFSET, MAP_TOOLTIP_OFFSET, NO_DATA_COLOR, TREND_TOOLTIP_OFFSET,
};
use serde_json::{json, Map, Value};
use std::fmt::Write as _;

const RAMP_STEPS: usize = 256;

const STYLE: &str = r#"body { font-family: sans-serif; margin: 2em; }
section { margin-bottom: 3em; }
.controls { margin-bottom: 1em; }
#tooltip { position: absolute; display: none; pointer-events: none; white-space: pre-line;
  background: white; border: 1px solid #ddd; border-radius: 5px; padding: 5px; }
"#;

const SCRIPT: &str = r#"(function () {
  var data = JSON.parse(document.getElementById('dashboard-data').textContent);
  var slider = document.getElementById('year-slider');
  var label = document.getElementById('year-label');
  var map = data.map;
  if (map) {
    var paths = document.querySelectorAll('#map_chart path.country');
    slider.addEventListener('input', function () {
      label.textContent = slider.value;
      var temps = map.years[slider.value] || [];
      paths.forEach(function (path, i) {
        var t = temps[i];
        var known = typeof t === 'number';
        var fill = map.fallback;
        if (known) {
          var k = (t - map.domain[0]) / (map.domain[1] - map.domain[0]);
          k = Math.min(1, Math.max(0, k));
          fill = map.ramp[Math.round(k * (map.ramp.length - 1))];
        }
        path.setAttribute('fill', fill);
        var title = path.querySelector('title');
        if (title) {
          title.textContent = map.names[i] + ': ' + (known ? t.toFixed(2) + '°C' : 'No data');
        }
      });
    });
  }
  var select = document.getElementById('countrySelect');
  select.addEventListener('change', function () {
    document.querySelectorAll('#bar_chart .country-chart').forEach(function (chart) {
      chart.hidden = chart.dataset.country !== select.value;
    });
  });
  var tooltip = document.getElementById('tooltip');
  var anchor = null;
  document.addEventListener('mousemove', function (event) {
    var target = event.target;
    var title = target.querySelector ? target.querySelector(':scope > title') : null;
    var container = target.closest ? target.closest('[data-tooltip-offset]') : null;
    if (!title || !container) {
      tooltip.style.display = 'none';
      anchor = null;
      return;
    }
    var entering = anchor !== target;
    anchor = target;
    if (entering) {
      tooltip.textContent = title.textContent;
    }
    if (entering || container.dataset.tooltipFollow === 'true') {
      var offset = container.dataset.tooltipOffset.split(',').map(Number);
      tooltip.style.left = (event.pageX + offset[0]) + 'px';
      tooltip.style.top = (event.pageY + offset[1]) + 'px';
    }
    tooltip.style.display = 'block';
  });
})();
"#;

/// Tooltip placement for every chart inside a container.
fn tooltip_attrs(offset: (f64, f64), follow: bool) -> String {
    format!(
        "data-tooltip-offset=\"{},{}\" data-tooltip-follow=\"{}\"",
        offset.0, offset.1, follow
    )
}

/// Per-year feature temperatures and the color ramp the slider needs.
fn map_data(dashboard: &Dashboard) -> Value {
    let Some(map) = &dashboard.map else {
        return Value::Null;
    };

    let names: Vec<&str> = map
        .boundaries()
        .features
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    let ramp: Vec<String> = dashboard
        .color
        .ramp(RAMP_STEPS)
        .iter()
        .map(|c| c.to_hex())
        .collect();

    let mut years = Map::new();
    for (year, temps) in map.year_table() {
        let temps: Vec<Value> = temps
            .into_iter()
            .map(|t| match t {
                Some(t) => json!((t * 100.0).round() / 100.0),
                None => Value::Null,
            })
            .collect();
        years.insert(year.to_string(), Value::Array(temps));
    }

    let (d0, d1) = dashboard.color.domain();
    json!({
        "names": names,
        "domain": [d0, d1],
        "ramp": ramp,
        "fallback": NO_DATA_COLOR,
        "years": years,
    })
}

fn write_map(out: &mut String, dashboard: &Dashboard) {
    out.push_str("<section>\n<h2>Average temperature by country</h2>\n<div class=\"controls\">\n");
    match &dashboard.map {
        Some(map) => {
            let slider = map.slider();
            let _ = writeln!(
                out,
                "<input type=\"range\" id=\"year-slider\" min=\"{}\" max=\"{}\" step=\"1\" value=\"{}\">\
                 <span id=\"year-label\">{}</span>",
                slider.min(),
                slider.max(),
                slider.value(),
                slider.value()
            );
        }
        None => out.push_str(
            "<input type=\"range\" id=\"year-slider\" disabled><span id=\"year-label\"></span>\n",
        ),
    }
    let _ = write!(
        out,
        "</div>\n<div id=\"map_chart\" {}>\n",
        tooltip_attrs(MAP_TOOLTIP_OFFSET, true)
    );
    if let Some(map) = &dashboard.map {
        out.push_str(&map.surface().to_svg());
    }
    out.push_str("</div>\n</section>\n");
}

fn write_trends(out: &mut String, dashboard: &Dashboard) {
    let _ = write!(
        out,
        "<section>\n<h2>Global average temperature</h2>\n<div id=\"line_chart\" {}>\n",
        tooltip_attrs(TREND_TOOLTIP_OFFSET, false)
    );
    if let Some(line) = &dashboard.line {
        out.push_str(&line.surface().to_svg());
    }
    out.push_str("</div>\n</section>\n");

    let _ = write!(
        out,
        "<section>\n<h2>Yearly average temperature</h2>\n<div id=\"scatterplot\" {}>\n",
        tooltip_attrs(TREND_TOOLTIP_OFFSET, false)
    );
    if let Some(scatter) = &dashboard.scatter {
        out.push_str(&scatter.surface().to_svg());
    }
    out.push_str("</div>\n</section>\n");
}

fn write_bars(out: &mut String, dashboard: &Dashboard) {
    out.push_str("<section>\n<h2>Temperature by 50-year period</h2>\n<div class=\"controls\">\n");
    out.push_str("<select id=\"countrySelect\">\n");
    let selected = dashboard.bars.as_ref().and_then(|b| b.selected());
    if let Some(bars) = &dashboard.bars {
        for country in bars.countries() {
            let marker = if Some(country.as_str()) == selected {
                " selected"
            } else {
                ""
            };
            let _ = writeln!(out, "<option{}>{}</option>", marker, escape(country));
        }
    }
    let _ = write!(
        out,
        "</select>\n</div>\n<div id=\"bar_chart\" {}>\n",
        tooltip_attrs(BAR_TOOLTIP_OFFSET, true)
    );

    if let Some(bars) = &dashboard.bars {
        let mut charts = bars.render_all();
        if let Some(selected) = selected {
            if !bars.countries().iter().any(|c| c == selected) {
                charts.insert(0, (selected.to_string(), bars.surface().to_svg()));
            }
        }
        for (country, svg) in charts {
            let hidden = if Some(country.as_str()) == selected {
                ""
            } else {
                " hidden"
            };
            let _ = write!(
                out,
                "<div class=\"country-chart\" data-country=\"{}\"{}>\n{}</div>\n",
                escape(&country),
                hidden,
                svg
            );
        }
    }
    out.push_str("</div>\n</section>\n");
}

/// Render the full page. Failed charts leave their container empty.
pub fn render_page(dashboard: &Dashboard, title: &str) -> Result<String> {
    let data = serde_json::to_string(&json!({ "map": map_data(dashboard) }))?;

    let mut out = String::with_capacity(data.len() + 64 * 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(title));
    let _ = writeln!(out, "<style>\n{}</style>\n</head>\n<body>", STYLE);
    let _ = writeln!(out, "<h1>{}</h1>", escape(title));

    write_map(&mut out, dashboard);
    write_trends(&mut out, dashboard);
    write_bars(&mut out, dashboard);

    out.push_str("<div id=\"tooltip\"></div>\n");
    let _ = writeln!(
        out,
        "<script type=\"application/json\" id=\"dashboard-data\">{}</script>",
        data.replace("</", "<\\/")
    );
    let _ = writeln!(out, "<script>\n{}</script>\n</body>\n</html>", SCRIPT);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::ColorScale;

    fn empty_dashboard() -> Dashboard {
        Dashboard {
            map: None,
            line: None,
            scatter: None,
            bars: None,
            color: ColorScale::temperature(),
        }
    }

    #[test]
    fn test_page_has_every_container() -> Result<()> {
        let page = render_page(&empty_dashboard(), "Climate <Dashboard>")?;

        for id in [
            "map_chart",
            "line_chart",
            "scatterplot",
            "bar_chart",
            "year-slider",
            "countrySelect",
            "tooltip",
        ] {
            assert!(page.contains(&format!("id=\"{}\"", id)), "missing {}", id);
        }
        assert!(page.contains("<title>Climate &lt;Dashboard&gt;</title>"));
        Ok(())
    }

    #[test]
    fn test_failed_charts_leave_containers_empty() -> Result<()> {
        let page = render_page(&empty_dashboard(), "Climate")?;

        assert!(page.contains(
            "<div id=\"line_chart\" data-tooltip-offset=\"10,-28\" data-tooltip-follow=\"false\">\n</div>"
        ));
        assert!(page.contains("id=\"year-slider\" disabled"));
        assert!(!page.contains("<svg"));
        assert!(page.contains("{\"map\":null}"));
        Ok(())
    }

    #[test]
    fn test_only_map_and_bar_tooltips_follow() -> Result<()> {
        let page = render_page(&empty_dashboard(), "Climate")?;

        assert!(page.contains("id=\"map_chart\" data-tooltip-offset=\"10,10\" data-tooltip-follow=\"true\""));
        assert!(page.contains("id=\"bar_chart\" data-tooltip-offset=\"10,-10\" data-tooltip-follow=\"true\""));
        assert!(page.contains("id=\"scatterplot\" data-tooltip-offset=\"10,-28\" data-tooltip-follow=\"false\""));
        assert!(page.contains("container.dataset.tooltipFollow === 'true'"));
        Ok(())
    }
}
