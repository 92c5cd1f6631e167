// ═══════════════════════════════════════════════════════════════════
// Integration Tests — EgxPortfolio facade end to end
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use egx_portfolio_core::errors::CoreError;
use egx_portfolio_core::models::analysis::{FairValueSource, Recommendation};
use egx_portfolio_core::models::certificate::{Certificate, CertificateStatus, PaymentFrequency};
use egx_portfolio_core::models::filter::{HoldingFilter, HoldingSortOrder};
use egx_portfolio_core::models::holding::{Holding, HoldingRole, HoldingStatus};
use egx_portfolio_core::models::portfolio::Portfolio;
use egx_portfolio_core::models::watchlist::WatchlistItem;
use egx_portfolio_core::providers::registry::QuoteProviderRegistry;
use egx_portfolio_core::providers::traits::QuoteProvider;
use egx_portfolio_core::storage::backup::ImportMode;
use egx_portfolio_core::EgxPortfolio;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

struct FixedQuotes;

#[async_trait]
impl QuoteProvider for FixedQuotes {
    fn name(&self) -> &str {
        "Fixed"
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        match symbol {
            "COMI" => Ok(90.0),
            "EAST" => Ok(30.0),
            other => Err(CoreError::PriceNotAvailable(other.to_string())),
        }
    }
}

fn fixed_registry() -> QuoteProviderRegistry {
    let mut registry = QuoteProviderRegistry::new();
    registry.register(Box::new(FixedQuotes));
    registry
}

/// A tracker with COMI, EAST and ORWE already added.
fn seeded() -> (EgxPortfolio, Uuid, Uuid, Uuid) {
    let mut t = EgxPortfolio::create_new().with_quote_registry(fixed_registry());
    let comi = t
        .add_holding(
            Holding::new("COMI", "Commercial International Bank", 100, 50.0, 80.0)
                .with_sector("Banks")
                .with_fundamentals(Some(10.0), Some(15.0)),
        )
        .unwrap();
    let east = t
        .add_holding(
            Holding::new("EAST", "Eastern Company", 200, 20.0, 25.0)
                .with_sector("Tobacco")
                .with_role(HoldingRole::Income)
                .with_fair_value(26.0),
        )
        .unwrap();
    let orwe = t
        .add_holding(
            Holding::new("ORWE", "Oriental Weavers", 300, 20.0, 15.0)
                .with_sector("Textiles")
                .with_role(HoldingRole::Growth)
                .with_status(HoldingStatus::Review),
        )
        .unwrap();
    (t, comi, east, orwe)
}

// ═══════════════════════════════════════════════════════════════════
//  Lifecycle
// ═══════════════════════════════════════════════════════════════════

mod lifecycle {
    use super::*;

    #[test]
    fn new_tracker_is_clean() {
        let t = EgxPortfolio::create_new();
        assert!(!t.has_unsaved_changes());
        assert!(t.holdings().is_empty());
        assert_eq!(t.settings().currency, "EGP");
        assert_eq!(t.quote_provider_names(), vec!["Yahoo Finance"]);
    }

    #[test]
    fn mutations_mark_dirty_and_save_clears() {
        let (mut t, _, _, _) = seeded();
        assert!(t.has_unsaved_changes());
        let bytes = t.save_to_bytes("pw").unwrap();
        assert!(!t.has_unsaved_changes());

        let loaded = EgxPortfolio::load_from_bytes(&bytes, "pw").unwrap();
        assert!(!loaded.has_unsaved_changes());
        assert_eq!(loaded.portfolio(), t.portfolio());
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.egxp");
        let path = path.to_str().unwrap();

        let (mut t, comi, _, _) = seeded();
        t.save_to_file(path, "pw").unwrap();
        let loaded = EgxPortfolio::load_from_file(path, "pw").unwrap();
        assert_eq!(loaded.get_holding(comi).unwrap().symbol, "COMI");
    }

    #[test]
    fn change_password() {
        let (mut t, _, _, _) = seeded();
        let saved = t.save_to_bytes("old").unwrap();

        assert!(matches!(
            t.change_password(&saved, "wrong", "new"),
            Err(CoreError::Decryption)
        ));

        let rekeyed = t.change_password(&saved, "old", "new").unwrap();
        assert!(EgxPortfolio::load_from_bytes(&rekeyed, "new").is_ok());
        assert!(EgxPortfolio::load_from_bytes(&rekeyed, "old").is_err());
    }

    #[test]
    fn from_portfolio_wraps_existing_records() {
        let mut p = Portfolio::default();
        p.holdings.push(Holding::new("COMI", "CIB", 1, 1.0, 2.0));
        let t = EgxPortfolio::from_portfolio(p);
        assert_eq!(t.holdings().len(), 1);
        assert!(!t.has_unsaved_changes());
    }

    #[test]
    fn debug_shows_counts() {
        let (t, _, _, _) = seeded();
        let debug = format!("{t:?}");
        assert!(debug.contains("EgxPortfolio"));
        assert!(debug.contains("holdings: 3"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Holdings, listing, analytics
// ═══════════════════════════════════════════════════════════════════

mod holdings {
    use super::*;

    #[test]
    fn list_with_filter_and_sort() {
        let (t, _, _, _) = seeded();
        let all = t.list_holdings(&HoldingFilter::new(), HoldingSortOrder::SymbolAsc);
        let syms: Vec<&str> = all.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(syms, vec!["COMI", "EAST", "ORWE"]);

        let review = t.list_holdings(
            &HoldingFilter::new().status(HoldingStatus::Review),
            HoldingSortOrder::ValueDesc,
        );
        assert_eq!(review.len(), 1);
        assert_eq!(review[0].symbol, "ORWE");
    }

    #[test]
    fn summary_respects_filter() {
        let (t, _, _, _) = seeded();
        let all = t.summary(&HoldingFilter::new());
        assert_eq!(all.count, 3);
        assert!(approx(all.total_value, 17_500.0));
        assert!(approx(all.total_cost, 15_000.0));

        let income = t.summary(&HoldingFilter::new().role(HoldingRole::Income));
        assert_eq!(income.count, 1);
        assert!(approx(income.total_profit_loss, 1_000.0));
        assert!(approx(income.profit_loss_percent, 25.0));
    }

    #[test]
    fn sectors_and_allocation() {
        let (t, _, _, _) = seeded();
        assert_eq!(t.sectors(), vec!["Banks", "Textiles", "Tobacco"]);
        assert_eq!(t.allocation_by_sector()[0].label, "Banks");
        assert_eq!(t.allocation_by_role()[0].label, "Core");
        assert!(t.target_drift().is_empty());
    }

    #[test]
    fn sector_choices_select_their_holdings() {
        let (mut t, _, _, _) = seeded();
        t.add_holding(Holding::new("CIEB", "Credit Agricole Egypt", 10, 10.0, 12.0).with_sector("Banks "))
            .unwrap();

        for sector in t.sectors() {
            let listed = t.list_holdings(
                &HoldingFilter::new().sector(sector.clone()),
                HoldingSortOrder::SymbolAsc,
            );
            assert!(!listed.is_empty(), "sector {sector:?} lists nothing");
        }

        let banks = t.list_holdings(&HoldingFilter::new().sector("Banks"), HoldingSortOrder::SymbolAsc);
        let syms: Vec<&str> = banks.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(syms, vec!["CIEB", "COMI"]);
        assert_eq!(t.summary(&HoldingFilter::new().sector("Banks")).count, 2);
    }

    #[test]
    fn analysis_per_holding() {
        let (t, comi, east, orwe) = seeded();

        let a = t.analyze(comi).unwrap();
        assert!(approx(a.fair_value.unwrap(), 385.0));
        assert_eq!(a.fair_value_source, Some(FairValueSource::Graham));
        assert_eq!(a.recommendation, Recommendation::StrongBuy);

        let b = t.analyze(east).unwrap();
        assert_eq!(b.fair_value, Some(26.0));
        assert_eq!(b.recommendation, Recommendation::Hold);

        assert_eq!(t.analyze(orwe).unwrap().recommendation, Recommendation::NoData);
        assert!(t.analyze(Uuid::new_v4()).is_none());
        assert_eq!(t.analyze_all().len(), 3);
    }

    #[test]
    fn default_growth_rate_setting_feeds_analysis() {
        let mut t = EgxPortfolio::create_new();
        let id = t
            .add_holding(Holding::new("SWDY", "Elsewedy", 10, 10.0, 20.0).with_fundamentals(Some(2.0), None))
            .unwrap();
        // 2 × (8.5 + 10) = 37
        assert!(approx(t.analyze(id).unwrap().fair_value.unwrap(), 37.0));

        t.set_default_growth_rate(0.0).unwrap();
        assert!(approx(t.analyze(id).unwrap().fair_value.unwrap(), 17.0));
        assert!(t.set_default_growth_rate(f64::NAN).is_err());
    }

    #[test]
    fn update_price_and_remove() {
        let (mut t, comi, _, _) = seeded();
        t.update_price(comi, 100.0).unwrap();
        assert_eq!(t.find_holding("comi").unwrap().current_price, 100.0);

        let removed = t.remove_holding(comi).unwrap();
        assert_eq!(removed.symbol, "COMI");
        assert!(t.get_holding(comi).is_none());
        assert!(matches!(t.remove_holding(comi), Err(CoreError::HoldingNotFound(_))));
    }

    #[test]
    fn update_holding_through_facade() {
        let (mut t, _, east, _) = seeded();
        let mut h = t.get_holding(east).unwrap().clone();
        h.status = HoldingStatus::Exit;
        t.update_holding(h).unwrap();
        assert_eq!(t.get_holding(east).unwrap().status, HoldingStatus::Exit);
    }

    #[tokio::test]
    async fn refresh_prices() {
        let (mut t, comi, east, orwe) = seeded();
        t.save_to_bytes("pw").unwrap();

        let report = t.refresh_prices().await.unwrap();
        assert_eq!(report.updated.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert!(t.has_unsaved_changes());
        assert_eq!(t.get_holding(comi).unwrap().current_price, 90.0);
        assert_eq!(t.get_holding(east).unwrap().current_price, 30.0);
        assert_eq!(t.get_holding(orwe).unwrap().current_price, 15.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Watchlist & certificates
// ═══════════════════════════════════════════════════════════════════

mod watchlist_and_certificates {
    use super::*;

    #[test]
    fn promote_moves_item_into_holdings() {
        let mut t = EgxPortfolio::create_new();
        let id = t
            .add_watchlist_item(WatchlistItem::new("TMGH", "Talaat Moustafa").with_target_price(55.0))
            .unwrap();

        let holding_id = t.promote_watchlist_item(id, 60.0).unwrap();
        assert!(t.watchlist().is_empty());
        let h = t.get_holding(holding_id).unwrap();
        assert_eq!(h.symbol, "TMGH");
        assert_eq!(h.status, HoldingStatus::Watch);
        assert_eq!(h.fair_value, None);
        assert_eq!(h.notes.as_deref(), Some("Watchlist target price: 55"));
    }

    #[test]
    fn promote_keeps_item_when_symbol_already_held() {
        let (mut t, _, _, _) = seeded();
        let id = t.add_watchlist_item(WatchlistItem::new("COMI", "CIB")).unwrap();
        assert!(matches!(
            t.promote_watchlist_item(id, 80.0),
            Err(CoreError::DuplicateSymbol(_))
        ));
        assert_eq!(t.watchlist().len(), 1);
    }

    #[test]
    fn promote_unknown_item() {
        let mut t = EgxPortfolio::create_new();
        assert!(matches!(
            t.promote_watchlist_item(Uuid::new_v4(), 1.0),
            Err(CoreError::WatchlistItemNotFound(_))
        ));
    }

    #[test]
    fn watchlist_update_and_remove() {
        let mut t = EgxPortfolio::create_new();
        let item = WatchlistItem::new("HRHO", "EFG");
        let id = t.add_watchlist_item(item.clone()).unwrap();
        t.update_watchlist_item(item.with_target_price(19.0)).unwrap();
        assert_eq!(t.watchlist()[0].target_price, Some(19.0));
        t.remove_watchlist_item(id).unwrap();
        assert!(t.watchlist().is_empty());
    }

    #[test]
    fn certificates_summary_and_maturity() {
        let mut t = EgxPortfolio::create_new();
        let cert = Certificate::new("CIB", 120_000.0, 1, 25.0, d(2024, 6, 1), PaymentFrequency::Monthly);
        let id = t.add_certificate(cert).unwrap();

        let before = t.certificate_summary(d(2025, 1, 1));
        assert_eq!(before.active_count, 1);
        assert!(approx(before.monthly_income, 2_500.0));

        t.save_to_bytes("pw").unwrap();
        assert_eq!(t.mark_matured_certificates(d(2025, 5, 31)), 0);
        assert!(!t.has_unsaved_changes());
        assert_eq!(t.mark_matured_certificates(d(2025, 6, 1)), 1);
        assert!(t.has_unsaved_changes());
        assert_eq!(t.certificates()[0].status, CertificateStatus::Matured);
        assert_eq!(t.certificate_summary(d(2025, 6, 1)).active_count, 0);

        let mut updated = t.certificates()[0].clone();
        updated.notes = Some("Renewed at branch".into());
        t.update_certificate(updated).unwrap();
        t.remove_certificate(id).unwrap();
        assert!(t.certificates().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Backup & settings
// ═══════════════════════════════════════════════════════════════════

mod backup_and_settings {
    use super::*;

    #[test]
    fn backup_restore_between_trackers() {
        let (mut source, _, _, _) = seeded();
        source.add_watchlist_item(WatchlistItem::new("HRHO", "EFG")).unwrap();
        source
            .add_certificate(Certificate::new("NBE", 10_000.0, 3, 20.0, d(2024, 1, 1), PaymentFrequency::Quarterly))
            .unwrap();
        let json = source.export_backup().unwrap();

        let mut target = EgxPortfolio::create_new();
        let report = target.import_backup(&json, ImportMode::Replace).unwrap();
        assert_eq!(report.holdings, 3);
        assert_eq!(report.watchlist, 1);
        assert_eq!(report.certificates, 1);
        assert!(target.has_unsaved_changes());
        assert_eq!(target.holdings(), source.holdings());
        assert_eq!(target.watchlist(), source.watchlist());
        assert_eq!(target.certificates(), source.certificates());
    }

    #[test]
    fn failed_import_changes_nothing() {
        let (mut t, _, _, _) = seeded();
        t.save_to_bytes("pw").unwrap();
        assert!(t.import_backup("{}", ImportMode::Replace).is_err());
        assert_eq!(t.holdings().len(), 3);
        assert!(!t.has_unsaved_changes());
    }

    #[test]
    fn currency_validation() {
        let mut t = EgxPortfolio::create_new();
        t.set_currency(" usd ").unwrap();
        assert_eq!(t.settings().currency, "USD");
        assert!(t.set_currency("EURO").is_err());
        assert!(t.set_currency("E1P").is_err());
    }

    #[test]
    fn quote_suffix_keeps_custom_providers() {
        let mut t = EgxPortfolio::create_new().with_quote_registry(fixed_registry());
        t.set_quote_suffix(".CA");
        assert_eq!(t.settings().quote_suffix, ".CA");
        assert_eq!(t.quote_provider_names(), vec!["Fixed"]);

        let mut empty = EgxPortfolio::create_new().with_quote_registry(QuoteProviderRegistry::new());
        empty.set_quote_suffix(".CA");
        assert!(empty.quote_provider_names().is_empty());
    }

    #[tokio::test]
    async fn refresh_after_suffix_change_uses_custom_providers() {
        let (mut t, comi, _, _) = seeded();
        t.set_quote_suffix(".XX");
        let report = t.refresh_prices().await.unwrap();
        assert_eq!(report.updated.len(), 2);
        assert_eq!(t.get_holding(comi).unwrap().current_price, 90.0);
    }

    #[test]
    fn quote_suffix_setting() {
        let mut t = EgxPortfolio::create_new();
        t.set_quote_suffix(" .CA ");
        assert_eq!(t.settings().quote_suffix, ".CA");
        assert!(t.has_unsaved_changes());
        assert_eq!(t.quote_provider_names(), vec!["Yahoo Finance"]);
    }
}
