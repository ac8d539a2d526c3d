use crate::models::{Dashboard, FollowUpView, Status, Urgency, CONTEXTS};

pub fn render_dashboard(dashboard: &Dashboard, error: Option<&str>) -> String {
    let error_banner = error
        .map(|message| format!(r#"<div class="banner">{}</div>"#, escape_html(message)))
        .unwrap_or_default();

    let rows = if dashboard.followups.is_empty() {
        r#"<tr><td colspan="5" class="empty">No follow-ups yet. Add one above.</td></tr>"#.to_string()
    } else {
        dashboard.followups.iter().map(render_row).collect::<Vec<_>>().join("\n")
    };

    let context_options = CONTEXTS
        .iter()
        .map(|context| format!(r#"<option value="{context}">{context}</option>"#))
        .collect::<Vec<_>>()
        .join("");

    INDEX_HTML
        .replace("{{ERROR}}", &error_banner)
        .replace("{{TODAY}}", &dashboard.today.format("%a %b %-d, %Y").to_string())
        .replace("{{ZONE}}", &escape_html(&dashboard.time_zone))
        .replace("{{DUE_TODAY}}", &dashboard.stats.due_today.to_string())
        .replace("{{UPCOMING}}", &dashboard.stats.upcoming.to_string())
        .replace("{{OVERDUE}}", &dashboard.stats.overdue.to_string())
        .replace("{{COMPLETED}}", &dashboard.stats.completed.to_string())
        .replace("{{DEFAULT_DATE}}", &dashboard.today.to_string())
        .replace("{{CONTEXTS}}", &context_options)
        .replace("{{ROWS}}", &rows)
}

fn render_row(view: &FollowUpView) -> String {
    let item = &view.followup;
    let name = escape_html(&item.person_name);
    let notes = item
        .notes
        .as_deref()
        .map(|notes| format!(r#"<div class="notes">{}</div>"#, escape_html(notes)))
        .unwrap_or_default();

    let complete_button = if item.status == Status::Pending {
        format!(
            r#"<form method="post" action="/followups/{id}/complete"><button class="btn-done" type="submit">Mark completed</button></form>"#,
            id = item.id
        )
    } else {
        String::new()
    };

    format!(
        r#"<tr class="{class}">
  <td><div class="person">{name}</div>{notes}</td>
  <td>{context}</td>
  <td><div>{date}</div><div class="weekday">{weekday}</div></td>
  <td><span class="badge {class}">{label}</span> <span class="days">{days}</span></td>
  <td class="row-actions">{complete_button}<form method="post" action="/followups/{id}/delete" data-prompt="Delete follow-up with {name}?" onsubmit="return confirm(this.dataset.prompt);"><button class="btn-delete" type="submit">Delete</button></form></td>
</tr>"#,
        class = urgency_class(view.urgency),
        context = escape_html(&item.context),
        date = item.followup_date,
        weekday = item.followup_date.format("%a"),
        label = view.urgency.label(),
        days = days_label(view),
        id = item.id,
    )
}

fn urgency_class(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Upcoming => "upcoming",
        Urgency::DueToday => "due-today",
        Urgency::Overdue => "overdue",
        Urgency::Completed => "completed",
    }
}

fn days_label(view: &FollowUpView) -> String {
    match view.urgency {
        Urgency::Completed | Urgency::DueToday => String::new(),
        Urgency::Overdue => format!("{}d late", view.days_remaining.unsigned_abs()),
        Urgency::Upcoming => format!("in {}d", view.days_remaining),
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>FollowUpPing</title>
  <style>
    :root {
      --bg-1: #f1f5fb;
      --ink: #1f2a37;
      --muted: #5f6b7a;
      --accent: #2563eb;
      --due: #dc2626;
      --late: #ea580c;
      --done: #16a34a;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(31, 42, 55, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #e6eefc 60%, #f4f6fa 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1040px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
      color: var(--accent);
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .banner {
      padding: 14px 18px;
      border-radius: 14px;
      background: #fee2e2;
      color: #991b1b;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat, .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .stat .label {
      display: block;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .stat .value {
      font-size: 2.2rem;
      font-weight: 600;
    }

    .stat.due-today .value { color: var(--due); }
    .stat.upcoming .value { color: var(--accent); }
    .stat.overdue .value { color: var(--late); }
    .stat.completed .value { color: var(--done); }

    form.add {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    input, select, textarea {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid #cbd5e1;
    }

    button {
      font: inherit;
      border: none;
      border-radius: 10px;
      padding: 8px 14px;
      cursor: pointer;
      color: white;
      background: var(--accent);
    }

    .btn-done { background: var(--done); }
    .btn-delete { background: #64748b; }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 12px 10px;
      border-bottom: 1px solid #e2e8f0;
      vertical-align: top;
    }

    .person { font-weight: 600; }
    .notes, .weekday, .days { color: var(--muted); font-size: 0.85rem; }
    .empty { text-align: center; color: var(--muted); }

    .badge {
      display: inline-block;
      padding: 2px 8px;
      border-radius: 6px;
      font-size: 0.75rem;
      font-weight: 700;
      text-transform: uppercase;
    }

    .badge.due-today { background: #fee2e2; color: var(--due); }
    .badge.overdue { background: #ffedd5; color: var(--late); }
    .badge.upcoming { background: #dbeafe; color: var(--accent); }
    .badge.completed { background: #dcfce7; color: var(--done); }

    tr.completed .person { text-decoration: line-through; color: var(--muted); }

    .row-actions {
      display: flex;
      gap: 8px;
    }

    .row-actions form {
      margin: 0;
    }

    @media (max-width: 600px) {
      .row-actions {
        flex-direction: column;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>FollowUpPing</h1>
      <p class="subtitle">Never miss an important follow-up again. Today is {{TODAY}} ({{ZONE}}).</p>
    </header>
    {{ERROR}}
    <section class="panel">
      <div class="stat due-today"><span class="label">Due today</span><span class="value">{{DUE_TODAY}}</span></div>
      <div class="stat upcoming"><span class="label">Upcoming</span><span class="value">{{UPCOMING}}</span></div>
      <div class="stat overdue"><span class="label">Overdue</span><span class="value">{{OVERDUE}}</span></div>
      <div class="stat completed"><span class="label">Completed</span><span class="value">{{COMPLETED}}</span></div>
    </section>
    <section class="card">
      <form class="add" method="post" action="/followups">
        <label>Person name<input name="person_name" required placeholder="e.g. Jane Doe" /></label>
        <label>Context<select name="context">{{CONTEXTS}}</select></label>
        <label>Follow-up date<input name="followup_date" type="date" required value="{{DEFAULT_DATE}}" /></label>
        <label>Notes<input name="notes" placeholder="Optional" /></label>
        <button type="submit">Add follow-up</button>
      </form>
    </section>
    <section class="card">
      <table>
        <thead>
          <tr><th>Person</th><th>Context</th><th>Date</th><th>Status</th><th></th></tr>
        </thead>
        <tbody>
{{ROWS}}
        </tbody>
      </table>
    </section>
  </main>
</body>
</html>
"#;
