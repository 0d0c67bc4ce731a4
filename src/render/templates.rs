//! HTML building blocks for dashboard pages.
//!
//! Components take already-escaped HTML for `content`/`*_html` parameters
//! and raw text everywhere else; raw text is escaped here.

use super::escape_html;

/// Base HTML layout wrapper.
#[must_use]
pub fn layout(title: &str, content: &str) -> String {
    let title = escape_html(title);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Claimboard</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
    <style>
        .bg-success {{ background-color: #16a34a; }} .text-success-foreground {{ color: #fff; }}
        .bg-warning {{ background-color: #f59e0b; }} .text-warning-foreground {{ color: #fff; }}
        .bg-destructive {{ background-color: #dc2626; }} .text-destructive-foreground {{ color: #fff; }}
        .bg-muted {{ background-color: #f3f4f6; }} .text-muted-foreground {{ color: #6b7280; }}
        .bg-secondary {{ background-color: #e5e7eb; }} .text-secondary-foreground {{ color: #111827; }}
        .bg-primary {{ background-color: #4f46e5; }} .text-primary-foreground {{ color: #fff; }}
    </style>
</head>
<body class="bg-gray-50 min-h-screen">
    <nav class="bg-white border-b border-gray-200 px-6 py-3 flex items-center gap-6">
        <span class="font-bold text-gray-900"><i class="fas fa-database text-indigo-600"></i> Claimboard</span>
        <a href="/" class="text-sm text-gray-600 hover:text-gray-900">Tables</a>
        <a href="/claims" class="text-sm text-gray-600 hover:text-gray-900">Fraud Analysis</a>
    </nav>
    <main class="container mx-auto px-4 py-8 space-y-6">
        {content}
    </main>
</body>
</html>"##
    )
}

/// Page heading with a subtitle.
#[must_use]
pub fn page_header(icon: &str, title: &str, subtitle: &str) -> String {
    format!(
        r##"<div class="mb-8">
            <h1 class="text-3xl font-bold text-gray-900 flex items-center gap-3">
                <i class="fas fa-{icon} text-indigo-600"></i> {title}
            </h1>
            <p class="mt-2 text-gray-500">{subtitle}</p>
        </div>"##,
        icon = escape_html(icon),
        title = escape_html(title),
        subtitle = escape_html(subtitle),
    )
}

/// Card component.
#[must_use]
pub fn card(title_html: &str, content: &str) -> String {
    format!(
        r##"<div class="bg-white rounded-xl shadow-sm border border-gray-200 overflow-hidden">
            <div class="px-6 py-4 border-b border-gray-200">
                <h3 class="text-lg font-semibold text-gray-900 flex items-center gap-2">{title_html}</h3>
            </div>
            <div class="p-6 space-y-4">
                {content}
            </div>
        </div>"##
    )
}

/// Icon followed by plain title text, for [`card`] titles.
#[must_use]
pub fn icon_title(icon: &str, title: &str) -> String {
    format!(r#"<i class="fas fa-{}"></i> {}"#, escape_html(icon), escape_html(title))
}

/// Stats tile. `value_html` is inserted as-is.
#[must_use]
pub fn stat_card(title: &str, value_html: &str, icon: &str, description: &str) -> String {
    format!(
        r##"<div class="bg-white rounded-xl shadow-sm border border-gray-200 p-6">
            <div class="flex items-center justify-between mb-2">
                <span class="text-sm font-medium text-gray-500">{title}</span>
                <i class="fas fa-{icon} text-indigo-600"></i>
            </div>
            <div class="text-2xl font-bold text-gray-900">{value_html}</div>
            <p class="text-xs text-gray-500 mt-1">{description}</p>
        </div>"##,
        title = escape_html(title),
        icon = escape_html(icon),
        description = escape_html(description),
    )
}

/// Badge component. `class` selects the color.
#[must_use]
pub fn badge(text: &str, class: &str) -> String {
    format!(
        r#"<span class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium {class}">{}</span>"#,
        escape_html(text)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Error,
}

/// Alert banner.
#[must_use]
pub fn alert(kind: AlertKind, title: &str, message: &str) -> String {
    let (classes, icon) = match kind {
        AlertKind::Warning => ("border-yellow-300 bg-yellow-50 text-yellow-800", "triangle-exclamation"),
        AlertKind::Error => ("border-red-300 bg-red-50 text-red-800", "circle-exclamation"),
    };
    format!(
        r##"<div role="alert" class="border rounded-lg p-4 {classes}">
            <div class="flex items-center gap-2 font-semibold"><i class="fas fa-{icon}"></i> {title}</div>
            <div class="mt-1 text-sm">{message}</div>
        </div>"##,
        title = escape_html(title),
        message = escape_html(message),
    )
}

/// Empty state component.
#[must_use]
pub fn empty_state(icon: &str, title: &str, description: &str) -> String {
    format!(
        r##"<div class="text-center py-12 bg-white rounded-xl border border-gray-200">
            <i class="fas fa-{icon} text-4xl text-gray-400 mb-4"></i>
            <h3 class="text-lg font-medium text-gray-900">{title}</h3>
            <p class="mt-1 text-gray-500">{description}</p>
        </div>"##,
        icon = escape_html(icon),
        title = escape_html(title),
        description = escape_html(description),
    )
}

/// Horizontal progress bar, `percent` clamped to `[0, 100]`.
#[must_use]
pub fn progress(percent: f64) -> String {
    let percent = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
    format!(
        r#"<div class="w-full h-3 bg-gray-200 rounded-full overflow-hidden" role="progressbar" aria-valuenow="{percent:.0}" aria-valuemin="0" aria-valuemax="100">
            <div class="h-3 bg-indigo-600" style="width: {percent:.1}%"></div>
        </div>"#
    )
}

/// Labelled field inside a details grid.
#[must_use]
pub fn field(icon: &str, label: &str, value: &str) -> String {
    format!(
        r##"<div class="flex items-start gap-3">
            <i class="fas fa-{icon} text-indigo-600 mt-1"></i>
            <div>
                <p class="text-sm font-medium text-gray-900">{label}</p>
                <p class="text-sm text-gray-500">{value}</p>
            </div>
        </div>"##,
        icon = escape_html(icon),
        label = escape_html(label),
        value = escape_html(value),
    )
}

/// Boxed text block (descriptions, notes, transcripts).
#[must_use]
pub fn text_block(icon: &str, label: &str, text: &str) -> String {
    format!(
        r##"<div class="p-4 bg-gray-50 rounded-lg border border-gray-200 space-y-2">
            <div class="flex items-center gap-2 text-sm font-medium text-gray-900"><i class="fas fa-{icon} text-indigo-600"></i> {label}</div>
            <p class="text-sm text-gray-500 whitespace-pre-wrap">{text}</p>
        </div>"##,
        icon = escape_html(icon),
        label = escape_html(label),
        text = escape_html(text),
    )
}

/// Table component. Headers and cells are raw text.
#[must_use]
pub fn data_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let headers_html: String = headers
        .iter()
        .map(|h| format!(r#"<th class="px-4 py-2 text-left text-xs font-semibold text-gray-700">{}</th>"#, escape_html(h)))
        .collect();

    let rows_html: String = if rows.is_empty() {
        format!(
            r#"<tr><td colspan="{}" class="px-4 py-6 text-center text-gray-500">No data available</td></tr>"#,
            headers.len().max(1)
        )
    } else {
        rows.iter()
            .map(|row| {
                let cells: String = row
                    .iter()
                    .map(|cell| format!(r#"<td class="px-4 py-2 text-sm text-gray-900 whitespace-nowrap">{}</td>"#, escape_html(cell)))
                    .collect();
                format!(r#"<tr class="hover:bg-gray-50">{cells}</tr>"#)
            })
            .collect()
    };

    format!(
        r##"<div class="max-h-[300px] overflow-auto rounded-md border border-gray-200">
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50"><tr>{headers_html}</tr></thead>
                <tbody class="bg-white divide-y divide-gray-200">{rows_html}</tbody>
            </table>
        </div>"##
    )
}
