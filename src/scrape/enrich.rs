// src/scrape/enrich.rs
use super::Session;
use crate::core::net::absolute_url;
use crate::data::Treaty;
use crate::progress::Progress;
use crate::specs::treaty_detail::parse_termination_type;

/// Stage 5: fill `termination_type` for terminated treaties from their detail pages.
///
/// Never fails: a detail page that won't load leaves the field empty and the
/// record in the dataset. Returns how many treaties got a value.
pub fn enrich_terminations(s: &mut Session, treaties: &mut [Treaty], progress: &mut dyn Progress) -> usize {
    let targets: Vec<usize> = treaties
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_terminated() && !t.treaty_url.trim().is_empty())
        .map(|(i, _)| i)
        .collect();

    logf!("Fetching termination type for {} terminated treaties …", targets.len());
    progress.begin("Detail pages", targets.len());

    let mut filled = 0;
    for &i in &targets {
        s.pacer.pause(s.opts.pacing.detail);
        let t = &mut treaties[i];
        let url = absolute_url(&t.treaty_url);

        match s.source.load(&url, None) {
            Ok(page) if page.is_ok() => {
                if let Some(kind) = parse_termination_type(&page.html) {
                    t.termination_type = kind;
                    filled += 1;
                } else {
                    logd!("No termination type on {url}");
                }
                progress.item_done(&t.short_title);
            }
            Ok(page) => {
                logw!("Could not load detail page {url}: HTTP {}", page.status);
                progress.item_failed(&t.short_title, &format!("HTTP {}", page.status));
            }
            Err(e) => {
                logw!("Could not load detail page {url}: {e}");
                progress.item_failed(&t.short_title, &e.to_string());
            }
        }
    }

    progress.finish();
    filled
}
