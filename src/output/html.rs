use std::fmt::Write as _;

use crate::model::{Anniversary, PageResult, Turn};
use crate::roster::Member;

use super::markdown::relative_days;

/// Escape text for HTML element content and attribute values.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn allergen_list(member: &Member) -> String {
    let list: Vec<&str> = member.allergens.iter().map(String::as_str).collect();
    escape_html(&list.join(", "))
}

fn avatar(member: &Member) -> String {
    format!(
        r#"<span class="avatar" title="{}">{}</span>"#,
        escape_html(&member.name),
        escape_html(&member.initials)
    )
}

fn turn_rows(turns: &[Turn], past: bool) -> String {
    let mut rows = String::new();
    for turn in turns {
        let when = if past {
            String::new()
        } else {
            relative_days(turn.days_remaining)
        };
        let _ = writeln!(
            rows,
            "<tr><td>{}</td><td>{} {}</td><td class=\"muted\">{}</td></tr>",
            turn.date,
            avatar(turn.member),
            escape_html(&turn.member.name),
            when
        );
    }
    if rows.is_empty() {
        rows.push_str("<tr><td colspan=\"3\" class=\"muted\">Nothing to show</td></tr>\n");
    }
    rows
}

fn anniversary_items(entries: &[Anniversary]) -> String {
    let mut items = String::new();
    for entry in entries {
        let _ = writeln!(
            items,
            "<li>{} <strong>{}</strong> <span class=\"muted\">{} ({})</span></li>",
            avatar(entry.member),
            escape_html(&entry.member.name),
            entry.month_day.label(),
            relative_days(entry.days_remaining)
        );
    }
    if items.is_empty() {
        items.push_str("<li class=\"muted\">None recorded</li>\n");
    }
    items
}

fn roster_rows(page: &PageResult) -> String {
    let mut rows = String::new();
    for (i, member) in page.members.iter().enumerate() {
        let class = if i == page.current.index {
            " class=\"current\""
        } else {
            ""
        };
        let _ = writeln!(
            rows,
            "<tr{}><td>{}</td><td>{} {}</td><td>{}</td><td>{}</td></tr>",
            class,
            i + 1,
            avatar(member),
            escape_html(&member.name),
            escape_html(&member.position),
            allergen_list(member)
        );
    }
    rows
}

fn allergen_summary(page: &PageResult) -> String {
    if page.allergens.is_empty() {
        return "<p class=\"muted\">No allergens in this team.</p>".to_string();
    }
    let mut out = String::from("<p>");
    let tags: Vec<String> = page
        .allergens
        .iter()
        .map(|a| format!("<span class=\"tag\">{}</span>", escape_html(a)))
        .collect();
    out.push_str(&tags.join(" "));
    out.push_str("</p>\n<ul>\n");
    for member in &page.members_with_allergens {
        let _ = writeln!(
            out,
            "<li>{}: {}</li>",
            escape_html(&member.name),
            allergen_list(member)
        );
    }
    out.push_str("</ul>");
    out
}

/// Render the full schedule page as a self-contained HTML document.
///
/// The page is readable without scripts; the embedded data only drives the
/// live countdown to the current turn.
pub fn render_page(page: &PageResult) -> String {
    let json_data = serde_json::to_string(page).unwrap_or_else(|_| "null".to_string());
    // Neutralize every `<` so no case variant of </script> closes the block.
    let safe_json = json_data.replace('<', "\\u003c");

    let team = escape_html(page.team.name);
    let current = &page.current;
    let headline = if current.is_today {
        format!(
            "Today, <strong>{}</strong> brings breakfast!",
            escape_html(&current.member.name)
        )
    } else {
        format!(
            "<strong>{}</strong> brings breakfast on {} {}",
            escape_html(&current.member.name),
            current.date.weekday(),
            current.date
        )
    };
    let current_allergens = if current.member.has_allergens() {
        format!(
            "<p class=\"muted\">Allergens: {}</p>",
            allergen_list(current.member)
        )
    } else {
        String::new()
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{team} breakfast rotation</title>
<style>
:root {{
  --bg: #ffffff;
  --bg-card: #f8f9fa;
  --text: #212529;
  --text-muted: #6c757d;
  --border: #dee2e6;
  --accent: #0d6efd;
  --success: #198754;
}}
@media (prefers-color-scheme: dark) {{
  :root {{
    --bg: #1a1a2e;
    --bg-card: #16213e;
    --text: #e0e0e0;
    --text-muted: #a0a0a0;
    --border: #2a2a4a;
    --accent: #4dabf7;
    --success: #51cf66;
  }}
}}
* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  background: var(--bg);
  color: var(--text);
  line-height: 1.6;
  padding: 2rem;
  max-width: 1000px;
  margin: 0 auto;
}}
h1 {{ margin-bottom: 0.25rem; }}
.muted {{ color: var(--text-muted); }}
.subtitle {{ color: var(--text-muted); margin-bottom: 2rem; font-size: 0.9rem; }}
.hero {{
  background: var(--bg-card);
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1.5rem;
  margin-bottom: 1.5rem;
  text-align: center;
  font-size: 1.25rem;
}}
#countdown {{ font-size: 2rem; font-weight: 700; color: var(--accent); }}
.grid {{
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
  gap: 1.5rem;
  margin-bottom: 1.5rem;
}}
.section {{
  background: var(--bg-card);
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1.5rem;
}}
.section h2 {{
  font-size: 1.1rem;
  margin-bottom: 1rem;
  border-bottom: 1px solid var(--border);
  padding-bottom: 0.5rem;
}}
table {{ width: 100%; border-collapse: collapse; font-size: 0.9rem; }}
td {{ padding: 0.4rem 0.5rem; border-bottom: 1px solid var(--border); }}
tr.current td {{ font-weight: 700; color: var(--success); }}
ul {{ list-style: none; }}
li {{ padding: 0.25rem 0; }}
.avatar {{
  display: inline-block;
  width: 2rem;
  height: 2rem;
  line-height: 2rem;
  border-radius: 50%;
  background: var(--accent);
  color: #fff;
  text-align: center;
  font-size: 0.75rem;
  font-weight: 600;
}}
.tag {{
  display: inline-block;
  border: 1px solid var(--border);
  border-radius: 4px;
  padding: 0 0.4rem;
  margin: 0 0.2rem 0.2rem 0;
}}
footer {{
  text-align: center;
  color: var(--text-muted);
  font-size: 0.8rem;
  margin-top: 2rem;
  padding-top: 1rem;
  border-top: 1px solid var(--border);
}}
</style>
</head>
<body>
<h1>{team}</h1>
<p class="subtitle">Generated: {generated_at}</p>
<div class="hero">
  <p>{avatar} {headline}</p>
  {current_allergens}
  <p id="countdown"></p>
</div>
<div class="grid">
  <div class="section">
    <h2>Upcoming</h2>
    <table><tbody>
{upcoming}</tbody></table>
  </div>
  <div class="section">
    <h2>History</h2>
    <table><tbody>
{history}</tbody></table>
  </div>
</div>
<div class="section">
  <h2>Team</h2>
  <table><tbody>
{roster}</tbody></table>
</div>
<div class="grid" style="margin-top:1.5rem">
  <div class="section">
    <h2>Allergens</h2>
    {allergens}
  </div>
  <div class="section">
    <h2>Birthdays</h2>
    <ul>
{birthdays}</ul>
  </div>
  <div class="section">
    <h2>Name days</h2>
    <ul>
{name_days}</ul>
  </div>
</div>
<footer>Generated by <strong>friday-rota</strong></footer>
<script>
const PAGE_DATA = {safe_json};
(function() {{
  const el = document.getElementById('countdown');
  const turn = PAGE_DATA.current;
  if (turn.is_today) {{
    el.textContent = "It's today!";
    return;
  }}
  const target = new Date(turn.date + 'T00:00:00');
  function tick() {{
    const ms = target - new Date();
    if (ms <= 0) {{
      el.textContent = "It's today!";
      return;
    }}
    const d = Math.floor(ms / 86400000);
    const h = Math.floor(ms / 3600000) % 24;
    const m = Math.floor(ms / 60000) % 60;
    const s = Math.floor(ms / 1000) % 60;
    el.textContent = d + 'd ' + h + 'h ' + m + 'm ' + s + 's';
  }}
  tick();
  setInterval(tick, 1000);
}})();
</script>
</body>
</html>
"##,
        generated_at = escape_html(&page.generated_at),
        avatar = avatar(current.member),
        upcoming = turn_rows(&page.upcoming, false),
        history = turn_rows(&page.history, true),
        roster = roster_rows(page),
        allergens = allergen_summary(page),
        birthdays = anniversary_items(&page.birthdays),
        name_days = anniversary_items(&page.name_days),
    )
}
