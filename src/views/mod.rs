//! Server-rendered pages, built with `format!`. Anything that comes from the
//! store goes through [`escape`] before it is emitted.

use chrono::{DateTime, Utc};

use crate::models::poll_models::Poll;
use crate::services::results::PollResults;
use crate::utils::flash::Flash;
use crate::utils::redirect::poll_detail_path;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn format_pub_date(pub_date: &DateTime<Utc>) -> String {
    pub_date.format("%B %-d, %Y, %H:%M UTC").to_string()
}

pub fn index_page(polls: &[Poll]) -> String {
    let mut body = String::from("<h1>Polls</h1>\n");

    if polls.is_empty() {
        body.push_str("<p>No polls are available.</p>\n");
        return layout("Polls", &body);
    }

    body.push_str("<ul>\n");
    for poll in polls {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a> <small>{}</small></li>\n",
            poll_detail_path(&poll.id.to_hex()),
            escape(&poll.question),
            format_pub_date(&poll.pub_date)
        ));
    }
    body.push_str("</ul>\n");

    layout("Polls", &body)
}

pub struct DetailView<'a> {
    pub results: &'a PollResults,
    pub form_error: Option<&'a str>,
    pub flash: Option<Flash>,
    pub refresh_interval_secs: u64,
}

pub fn detail_page(view: &DetailView<'_>) -> String {
    let poll = &view.results.poll;
    let poll_id = poll.id.to_hex();
    let mut body = format!("<h1>{}</h1>\n", escape(&poll.question));

    if let Some(flash) = view.flash {
        let class = if flash.is_error() { "error" } else { "success" };
        body.push_str(&format!(
            "<p class=\"flash {}\">{}</p>\n",
            class,
            escape(flash.message())
        ));
    }

    body.push_str(&format!(
        "<p>Total votes: <strong id=\"total-votes\">{}</strong></p>\n",
        view.results.total_votes
    ));

    body.push_str("<ul id=\"results\">\n");
    for (idx, choice) in view.results.choices.iter().enumerate() {
        body.push_str(&format!(
            "<li>{}: <span id=\"votes-{}\">{}</span></li>\n",
            escape(&choice.choice_text),
            idx,
            choice.votes
        ));
    }
    body.push_str("</ul>\n");

    if let Some(error) = view.form_error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\">\n",
        poll_detail_path(&poll_id)
    ));
    for choice in &view.results.choices {
        let choice_id = choice.id.to_hex();
        body.push_str(&format!(
            "<label><input type=\"radio\" name=\"choice\" value=\"{}\"> {}</label><br>\n",
            choice_id,
            escape(&choice.choice_text)
        ));
    }
    body.push_str("<button type=\"submit\">Vote</button>\n</form>\n");
    body.push_str("<p><a href=\"/\">Back to polls</a></p>\n");

    body.push_str(&refresh_script(&poll_id, view.refresh_interval_secs));

    layout(&poll.question, &body)
}

fn refresh_script(poll_id: &str, interval_secs: u64) -> String {
    let interval_ms = interval_secs.max(1) * 1000;
    format!(
        r#"<script>
setInterval(function () {{
  fetch("/api/polls/{poll_id}/results")
    .then(function (resp) {{ return resp.json(); }})
    .then(function (data) {{
      document.getElementById("total-votes").textContent = data.total_votes;
      data.results.forEach(function (row, idx) {{
        var cell = document.getElementById("votes-" + idx);
        if (cell) {{ cell.textContent = row.votes; }}
      }});
    }});
}}, {interval_ms});
</script>
"#
    )
}
