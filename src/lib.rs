pub mod controllers;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

#[cfg(feature = "cli")]
mod cli {
    use std::io::{self, BufRead, Write};

    use chrono::NaiveDate;

    use crate::controllers::delete::DeleteConfirmation;
    use crate::controllers::form::VoucherForm;
    use crate::controllers::list::{ListStatus, VoucherList};
    use crate::domain::types::{ApiBaseUrl, VoucherId};
    use crate::domain::voucher::Voucher;
    use crate::forms::voucher::VoucherField;
    use crate::models::config::AdminConfig;
    use crate::repository::cache::CachedVoucherRepository;
    use crate::repository::http::HttpVoucherRepository;
    use crate::services::vouchers::{
        DeleteResolution, FormSubmission, confirm_voucher_delete, load_vouchers, open_edit_form,
        submit_voucher_form,
    };

    /// Builds the repository stack from the configuration and runs the
    /// interactive admin console until EOF or `quit`.
    pub fn run(config: AdminConfig) -> io::Result<()> {
        let base_url = ApiBaseUrl::new(&config.api_base_url)
            .map_err(|e| io::Error::other(format!("invalid api_base_url: {e}")))?;
        let repo = HttpVoucherRepository::with_session(base_url, config.session_cookie.as_deref())
            .map_err(|e| io::Error::other(format!("Failed to build HTTP client: {e}")))?;
        let repo = CachedVoucherRepository::new(repo);

        let mut list = VoucherList::new(config.items_per_page);
        let mut dialog = DeleteConfirmation::new();

        load_vouchers(&mut list, &repo);
        render(&list);

        let stdin = io::stdin();
        loop {
            print!("> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(());
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [] | ["list"] => {
                    load_vouchers(&mut list, &repo);
                    render(&list);
                }
                ["page", number] => {
                    if let Ok(page) = number.parse::<usize>()
                        && list.set_page(page).is_some()
                    {
                        load_vouchers(&mut list, &repo);
                    }
                    render(&list);
                }
                ["per", number] => {
                    if let Ok(per_page) = number.parse::<usize>()
                        && list.set_per_page(per_page).is_some()
                    {
                        load_vouchers(&mut list, &repo);
                    }
                    render(&list);
                }
                ["search", rest @ ..] => {
                    let term = rest.join(" ");
                    if list.search(&term).is_some() {
                        load_vouchers(&mut list, &repo);
                    }
                    render(&list);
                }
                ["add", code, limit, start, end, rest @ ..] => {
                    let mut form = VoucherForm::create();
                    form.set_field(VoucherField::Code((*code).to_string()));
                    fill_form(&mut form, limit, start, end, rest);
                    report(submit_voucher_form(&mut form, &mut list, &repo));
                    render(&list);
                }
                ["edit", id, limit, start, end, rest @ ..] => match parse_id(id) {
                    Some(id) => match open_edit_form(&repo, id) {
                        Ok(mut form) => {
                            fill_form(&mut form, limit, start, end, rest);
                            report(submit_voucher_form(&mut form, &mut list, &repo));
                            render(&list);
                        }
                        Err(err) => println!("error: {err}"),
                    },
                    None => println!("error: invalid voucher id"),
                },
                ["delete", id] => match parse_id(id).and_then(|id| find(&list, id)) {
                    Some(voucher) => {
                        println!("delete voucher {}? (confirm/cancel)", voucher.code);
                        dialog.request(voucher);
                    }
                    None => println!("error: no such voucher on this page"),
                },
                ["confirm"] => {
                    match confirm_voucher_delete(&mut dialog, &mut list, &repo) {
                        DeleteResolution::Deleted => println!("deleted"),
                        DeleteResolution::Failed(message) => println!("error: {message}"),
                        DeleteResolution::Idle => println!("nothing staged for deletion"),
                        DeleteResolution::AlreadyPending => {}
                    }
                    render(&list);
                }
                ["cancel"] => dialog.cancel(),
                ["quit"] | ["exit"] => return Ok(()),
                _ => println!(
                    "commands: list | page N | per N | search [term] | \
                     add CODE LIMIT START END [free] | edit ID LIMIT START END [free] | \
                     delete ID | confirm | cancel | quit"
                ),
            }
        }
    }

    fn fill_form(form: &mut VoucherForm, limit: &str, start: &str, end: &str, rest: &[&str]) {
        form.set_field(VoucherField::UsageLimit(limit.to_string()));
        form.set_field(VoucherField::StartDate(parse_date(start)));
        form.set_field(VoucherField::EndDate(parse_date(end)));
        form.set_field(VoucherField::FreeShipping(rest.first() == Some(&"free")));
    }

    fn parse_date(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
    }

    fn parse_id(value: &str) -> Option<VoucherId> {
        value.parse::<i32>().ok().and_then(|id| VoucherId::new(id).ok())
    }

    fn find(list: &VoucherList, id: VoucherId) -> Option<Voucher> {
        list.items().iter().find(|v| v.id == id).cloned()
    }

    fn report(submission: FormSubmission) {
        match submission {
            FormSubmission::Saved(voucher) => println!("saved voucher {}", voucher.code),
            FormSubmission::Rejected(err) => println!("error: {err}"),
            FormSubmission::Failed(message) => println!("error: {message}"),
            FormSubmission::AlreadyPending => {}
        }
    }

    fn render(list: &VoucherList) {
        match list.status() {
            ListStatus::Loading => println!("loading..."),
            ListStatus::Failed => {
                println!("error: {}", list.error().unwrap_or("unknown error"));
            }
            ListStatus::Loaded if list.items().is_empty() => println!("no vouchers"),
            ListStatus::Loaded => {
                for v in list.items() {
                    println!(
                        "{:>4}  {:<16} {:>6}/{:<6} {} .. {} {}",
                        v.id,
                        v.code,
                        v.used_count,
                        v.usage_limit,
                        v.start_date,
                        v.end_date,
                        if v.is_free_shipping { "free-shipping" } else { "" },
                    );
                }
                println!("page {} of {}", list.page(), list.total_pages());
            }
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::run;
