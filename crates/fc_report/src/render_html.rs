//! HTML renderer: a compact single-page summary using an embedded template
//! (no external assets).

use crate::{ReportError, ReportModel};
use minijinja::{context, Environment};

static TEMPLATE: &str = r#"<!doctype html>
<html lang="en"><meta charset="utf-8">
<title>{{ cover.title }} — {{ integrity.result_id }}</title>
<h1>{{ cover.title }}</h1>
<p>{{ cover.contestants }} contestants, {{ cover.questions }} questions
({{ cover.pending }} pending, {{ cover.baseline_yes }} already yes) —
{{ cover.total_outcomes }} outcomes enumerated.</p>

<h2>Win-path shares</h2>
<table>
<tr><th>Contestant</th><th>Share</th><th>Status</th><th>Banked</th></tr>
{% for row in standings.rows %}
<tr><td>{{ row.contestant }}</td><td>{{ row.share }}</td>
<td>{{ row.status }}</td><td>{{ row.banked_score }}</td></tr>
{% endfor %}
</table>

<h2>Tie-breaking</h2>
<p>{{ ties.tie_outcomes }} outcomes ({{ ties.share }}) required tie-breaking.
{% if ties.tie_only %}Tie-only: {{ ties.tie_only|join(", ") }}{% endif %}</p>

<h2>Per-question sensitivity</h2>
<ul>
{% for q in sensitivity.questions %}
<li><strong>{{ q.question }}</strong>:
{% for pair in q.helps %}{{ pair[0] }} {{ pair[1] }}{% if not loop.last %}, {% endif %}{% endfor %}
</li>
{% endfor %}
</ul>

<h2>Integrity</h2>
<p>Result {{ integrity.result_id }}<br>
Run {{ integrity.run_id }}<br>
Engine {{ integrity.engine_vendor }}/{{ integrity.engine_name }}
v{{ integrity.engine_version }} ({{ integrity.engine_build }}) —
tie policy {{ integrity.tie_policy }}</p>
</html>
"#;

pub fn render_html(model: &ReportModel) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template("report.html", TEMPLATE)
        .map_err(|_| ReportError::Template("add_template"))?;
    let tmpl = env
        .get_template("report.html")
        .map_err(|_| ReportError::Template("get_template"))?;

    let ctx = context! {
        cover => &model.cover,
        standings => &model.standings,
        ties => &model.ties,
        sensitivity => &model.sensitivity,
        integrity => &model.integrity,
    };

    tmpl.render(ctx).map_err(|_| ReportError::Template("render_html"))
}
