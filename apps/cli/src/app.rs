//! # Application State and Menu Loop
//!
//! `App` owns every piece of state for one session and wires the menu to
//! the core and service crates. All services are plain fields passed by
//! reference; there are no globals.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                            App                                      │
//! │                                                                     │
//! │  warehouse      orders          pricing        suppliers            │
//! │  (depot-core)   (depot-core)    (depot-core)   (depot-services)     │
//! │                                                                     │
//! │  history        notifications   exporter       backups              │
//! │  (services)     (services)      (services)     (services)           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::info;

use depot_core::validation::{
    validate_customer_name, validate_discount_code, validate_email, validate_percent_bps,
    validate_phone, validate_price, validate_product_name, validate_quantity, validate_sku,
};
use depot_core::Money;
use depot_core::{
    AddOutcome, CategoryDetails, Dimensions, DiscountKind, Order, OrderStatus, PricingService,
    Product, Warehouse,
};
use depot_services::{
    compute_stats, inventory_report, low_stock_report, render_bar_chart, sales_report,
    BackupService, ExportService, NotificationCenter, OperationHistory, OperationKind, Supplier,
    SupplierManager,
};

use crate::config::AppConfig;
use crate::{console, input, seed};

const BAR_CHART_WIDTH: usize = 30;

/// All session state plus the menu loop.
pub struct App {
    config: AppConfig,
    warehouse: Warehouse,
    orders: Vec<Order>,
    pricing: PricingService,
    suppliers: SupplierManager,
    history: OperationHistory,
    notifications: NotificationCenter,
    exporter: ExportService,
    backups: BackupService,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (warehouse, suppliers) = if config.seed_demo {
            (seed::demo_warehouse(), seed::demo_suppliers())
        } else {
            (
                Warehouse::new("Main", "unconfigured"),
                SupplierManager::new(),
            )
        };

        let exporter = ExportService::new(&config.export_dir);
        let backups = BackupService::new(&config.backup_dir);

        App {
            config,
            warehouse,
            orders: Vec::new(),
            pricing: PricingService::with_standard_discounts(),
            suppliers,
            history: OperationHistory::new(),
            notifications: NotificationCenter::new(),
            exporter,
            backups,
        }
    }

    /// Runs the menu loop until the operator exits.
    pub fn run(&mut self) {
        info!(
            products = self.warehouse.product_count(),
            suppliers = self.suppliers.len(),
            "session started"
        );
        loop {
            self.print_menu();
            match input::prompt_nonempty("Select").as_str() {
                "1" => self.list_products(),
                "2" => self.add_product(),
                "3" => self.remove_product(),
                "4" => self.search_products(),
                "5" => self.receive_stock(),
                "6" => self.issue_stock(),
                "7" => self.update_price(),
                "8" => self.create_order(),
                "9" => self.manage_orders(),
                "10" => self.price_check(),
                "11" => self.reports_menu(),
                "12" => self.statistics(),
                "13" => self.exports_menu(),
                "14" => self.backups_menu(),
                "15" => self.suppliers_menu(),
                "16" => self.discounts_menu(),
                "17" => self.history_screen(),
                "18" => self.notifications_screen(),
                "0" => {
                    self.session_summary();
                    break;
                }
                _ => console::warning("Unknown option."),
            }
        }
    }

    fn session_summary(&self) {
        console::header("SESSION SUMMARY");
        let sales = sales_report(&self.orders);
        console::info(&format!(
            "Orders: {} ({} fulfilled), revenue {}.",
            sales.total_orders, sales.fulfilled, sales.revenue
        ));
        console::info(&format!(
            "Operations recorded: {}.",
            self.history.len()
        ));
        console::info("Goodbye.");
        info!(
            orders = sales.total_orders,
            operations = self.history.len(),
            "session ended"
        );
    }

    fn print_menu(&self) {
        console::header(&format!(
            "DEPOT - {} ({} SKUs, value {}, {} low stock, {} unread alerts)",
            self.warehouse.name,
            self.warehouse.product_count(),
            self.warehouse.total_value(),
            self.warehouse.low_stock(self.config.low_stock_threshold).len(),
            self.notifications.unread_count()
        ));
        console::info(" 1. List products         10. Price check");
        console::info(" 2. Add product           11. Reports");
        console::info(" 3. Remove product        12. Statistics");
        console::info(" 4. Search                13. Exports");
        console::info(" 5. Receive stock         14. Backups");
        console::info(" 6. Issue stock           15. Suppliers");
        console::info(" 7. Update price          16. Discounts");
        console::info(" 8. New order             17. History");
        console::info(" 9. Manage orders         18. Notifications");
        console::info(" 0. Exit");
    }

    // =========================================================================
    // Products
    // =========================================================================

    fn list_products(&self) {
        console::header("PRODUCTS");
        if self.warehouse.is_empty() {
            console::info("Catalog is empty.");
            return;
        }
        for p in self.warehouse.products() {
            console::info(&format!(
                "{:<12} {:<28} {:<12} {:>10} {:>6} units",
                p.sku,
                p.name,
                p.category(),
                p.price.to_string(),
                p.quantity
            ));
        }
        console::info(&format!(
            "Total: {} SKUs, {} units, value {}",
            self.warehouse.product_count(),
            self.warehouse.total_units(),
            self.warehouse.total_value()
        ));
    }

    fn prompt_sku(&self, label: &str) -> String {
        loop {
            let sku = input::prompt_nonempty(label);
            match validate_sku(&sku) {
                Ok(()) => return sku,
                Err(e) => console::warning(&e.to_string()),
            }
        }
    }

    fn prompt_quantity(&self, label: &str) -> i64 {
        loop {
            let quantity = input::prompt_i64(label);
            match validate_quantity(quantity) {
                Ok(()) => return quantity,
                Err(e) => console::warning(&e.to_string()),
            }
        }
    }

    fn prompt_product_name(&self) -> String {
        loop {
            let name = input::prompt_nonempty("Name");
            match validate_product_name(&name) {
                Ok(()) => return name,
                Err(e) => console::warning(&e.to_string()),
            }
        }
    }

    fn prompt_price(&self, label: &str) -> Money {
        loop {
            let price = input::prompt_money(label);
            match validate_price(price) {
                Ok(()) => return price,
                Err(e) => console::warning(&e.to_string()),
            }
        }
    }

    fn prompt_category_details(&self) -> CategoryDetails {
        console::info("Category: 1. Food  2. Electronics  3. Clothing  4. Household  5. Other");
        loop {
            match input::prompt_nonempty("Category").as_str() {
                "1" => {
                    return CategoryDetails::Food {
                        expires_on: input::prompt_date("Expires on (YYYY-MM-DD)"),
                        weight_kg: input::prompt_f64("Weight (kg)"),
                        organic: input::prompt_bool("Organic?", false),
                    }
                }
                "2" => {
                    return CategoryDetails::Electronics {
                        brand: input::prompt_nonempty("Brand"),
                        warranty_months: input::prompt_i64("Warranty (months)").max(0) as u32,
                        power_watts: input::prompt_f64("Power (watts)"),
                    }
                }
                "3" => {
                    return CategoryDetails::Clothing {
                        size: input::prompt_nonempty("Size"),
                        color: input::prompt_nonempty("Color"),
                        material: input::prompt_nonempty("Material"),
                        gender: input::prompt_nonempty("Gender"),
                    }
                }
                "4" => {
                    return CategoryDetails::Household {
                        room: input::prompt_nonempty("Room"),
                        dimensions: Dimensions {
                            width_cm: input::prompt_i64("Width (cm)").max(0) as u32,
                            height_cm: input::prompt_i64("Height (cm)").max(0) as u32,
                            depth_cm: input::prompt_i64("Depth (cm)").max(0) as u32,
                        },
                        weight_kg: input::prompt_f64("Weight (kg)"),
                    }
                }
                "5" => {
                    return CategoryDetails::Other {
                        category: input::prompt_nonempty("Category label"),
                    }
                }
                _ => console::warning("Pick 1-5."),
            }
        }
    }

    fn add_product(&mut self) {
        console::header("ADD PRODUCT");
        let sku = self.prompt_sku("SKU");
        if self.warehouse.get(&sku).is_some() {
            console::warning("SKU already catalogued; quantities will be merged.");
        }
        let name = self.prompt_product_name();
        let price = self.prompt_price("Unit price");
        let quantity = self.prompt_quantity("Quantity");
        let description = input::prompt_optional("Description").unwrap_or_default();
        let details = self.prompt_category_details();

        let product = Product::new(&sku, &name, price, quantity, description, details);
        match self.warehouse.add(product) {
            AddOutcome::Created => {
                console::success(&format!("Catalogued {sku} with {quantity} units."))
            }
            AddOutcome::Merged { new_quantity } => console::success(&format!(
                "Merged into existing {sku}; now {new_quantity} units."
            )),
        }
        self.history
            .record(OperationKind::ProductAdded, format!("{sku} x{quantity}"));
    }

    fn remove_product(&mut self) {
        console::header("REMOVE PRODUCT");
        let sku = self.prompt_sku("SKU");
        match self.warehouse.remove(&sku) {
            Ok(removed) => {
                console::success(&format!(
                    "Removed {} ({} units, value {}).",
                    removed.sku,
                    removed.quantity,
                    removed.stock_value()
                ));
                self.history
                    .record(OperationKind::ProductRemoved, removed.sku);
            }
            Err(e) => console::error(&e.to_string()),
        }
    }

    fn search_products(&self) {
        console::header("SEARCH");
        let query = input::prompt_nonempty("Search for");
        let hits = self.warehouse.search(&query);
        if hits.is_empty() {
            console::info("No matches.");
            return;
        }
        for p in hits {
            console::info(&format!(
                "{:<12} {:<28} {:>10} {:>6} units",
                p.sku,
                p.name,
                p.price.to_string(),
                p.quantity
            ));
        }
    }

    fn receive_stock(&mut self) {
        console::header("RECEIVE STOCK");
        let sku = self.prompt_sku("SKU");
        let quantity = self.prompt_quantity("Quantity received");
        match self.warehouse.receive(&sku, quantity) {
            Ok(new_quantity) => {
                console::success(&format!("{sku} now has {new_quantity} units."));
                self.history
                    .record(OperationKind::StockReceived, format!("{sku} x{quantity}"));
            }
            Err(e) => console::error(&e.to_string()),
        }
    }

    fn issue_stock(&mut self) {
        console::header("ISSUE STOCK");
        let sku = self.prompt_sku("SKU");
        let quantity = self.prompt_quantity("Quantity to issue");
        match self.warehouse.issue(&sku, quantity) {
            Ok(0) => {
                console::success(&format!(
                    "Issued {quantity} units of {sku}; SKU is now out of stock and left the catalog."
                ));
                self.history
                    .record(OperationKind::StockIssued, format!("{sku} x{quantity}"));
            }
            Ok(remaining) => {
                console::success(&format!(
                    "Issued {quantity} units of {sku}; {remaining} remain."
                ));
                self.history
                    .record(OperationKind::StockIssued, format!("{sku} x{quantity}"));
            }
            Err(e) => console::error(&e.to_string()),
        }
    }

    fn update_price(&mut self) {
        console::header("UPDATE PRICE");
        let sku = self.prompt_sku("SKU");
        let price = self.prompt_price("New unit price");
        match self.warehouse.set_price(&sku, price) {
            Ok(old) => {
                console::success(&format!("{sku}: {old} -> {price}."));
                self.history.record(
                    OperationKind::PriceChanged,
                    format!("{sku} {old} -> {price}"),
                );
            }
            Err(e) => console::error(&e.to_string()),
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    fn prompt_customer(&self) -> String {
        loop {
            let name = input::prompt_nonempty("Customer name");
            match validate_customer_name(&name) {
                Ok(()) => return name,
                Err(e) => console::warning(&e.to_string()),
            }
        }
    }

    fn create_order(&mut self) {
        console::header("NEW ORDER");
        let customer = self.prompt_customer();
        let mut order = Order::new(&customer);
        console::info(&format!("Order {} for {customer}.", order.id));
        console::info("Add lines; leave SKU empty to finish.");

        loop {
            let sku = match input::prompt_optional("SKU") {
                Some(sku) => sku,
                None => break,
            };
            let quantity = self.prompt_quantity("Quantity");
            if self.warehouse.get(&sku).is_none() {
                console::warning("SKU is not in the catalog; availability is checked at fulfillment.");
            }
            match order.add_line(&sku, quantity) {
                Ok(()) => console::success(&format!(
                    "Line added; running total {}.",
                    order.compute_total(&self.warehouse)
                )),
                Err(e) => console::error(&e.to_string()),
            }
        }

        if order.is_empty() {
            console::warning("No lines; order discarded.");
            return;
        }

        self.history
            .record(OperationKind::OrderCreated, order.id.clone());
        console::info(&format!(
            "Order {}: {} units, total {}.",
            order.id,
            order.total_units(),
            order.compute_total(&self.warehouse)
        ));

        if input::prompt_bool("Fulfill now?", true) {
            match order.fulfill(&mut self.warehouse) {
                Ok(total) => {
                    console::success(&format!("Order {} fulfilled for {total}.", order.id));
                    self.history
                        .record(OperationKind::OrderFulfilled, order.id.clone());
                }
                Err(e) => console::error(&format!("Not fulfilled: {e}")),
            }
        }
        self.orders.push(order);
    }

    fn manage_orders(&mut self) {
        console::header("ORDERS");
        if self.orders.is_empty() {
            console::info("No orders this session.");
            return;
        }
        for order in &self.orders {
            let total = match order.fulfilled_total {
                Some(total) => total,
                None => order.compute_total(&self.warehouse),
            };
            console::info(&format!(
                "{:<10} {:<20} {:<10} {:>5} units {:>12}",
                order.id,
                order.customer,
                order.status.label(),
                order.total_units(),
                total.to_string()
            ));
        }

        let id = match input::prompt_optional("Order id (empty to go back)") {
            Some(id) => id.to_uppercase(),
            None => return,
        };
        let Some(pos) = self.orders.iter().position(|o| o.id == id) else {
            console::error(&format!("No order {id}."));
            return;
        };

        match input::prompt_nonempty("Action: (f)ulfill / (s)hip / (d)eliver / (c)ancel")
            .to_lowercase()
            .as_str()
        {
            "f" => {
                let order = &mut self.orders[pos];
                match order.fulfill(&mut self.warehouse) {
                    Ok(total) => {
                        console::success(&format!("Order {id} fulfilled for {total}."));
                        self.history.record(OperationKind::OrderFulfilled, id);
                    }
                    Err(e) => console::error(&e.to_string()),
                }
            }
            "s" => match self.orders[pos].set_status(OrderStatus::Shipped) {
                Ok(()) => console::success(&format!("Order {id} shipped.")),
                Err(e) => console::error(&e.to_string()),
            },
            "d" => match self.orders[pos].set_status(OrderStatus::Delivered) {
                Ok(()) => console::success(&format!("Order {id} delivered.")),
                Err(e) => console::error(&e.to_string()),
            },
            "c" => match self.orders[pos].cancel() {
                Ok(()) => {
                    console::success(&format!("Order {id} cancelled."));
                    self.history.record(OperationKind::OrderCancelled, id);
                }
                Err(e) => console::error(&e.to_string()),
            },
            _ => console::warning("Unknown action."),
        }
    }

    fn price_check(&mut self) {
        console::header("PRICE CHECK");
        let sku = self.prompt_sku("SKU");
        let Some(product) = self.warehouse.get(&sku).cloned() else {
            console::error(&format!("Product not found: {sku}"));
            return;
        };
        let quantity = self.prompt_quantity("Quantity");
        let code = input::prompt_optional("Discount code (optional)").map(|c| c.to_uppercase());

        match self.pricing.quote(&product, quantity, code.as_deref()) {
            Ok(quote) => {
                console::info(&format!(
                    "{} x{} at {} = {}",
                    quote.name, quote.quantity, quote.unit_price, quote.base_total
                ));
                match &quote.discount_code {
                    Some(applied) => console::success(&format!(
                        "With {applied}: {} (saved {}).",
                        quote.final_total, quote.savings
                    )),
                    None => console::info("No discount applied."),
                }
            }
            Err(e) => console::error(&e.to_string()),
        }
    }

    // =========================================================================
    // Reports & Statistics
    // =========================================================================

    fn reports_menu(&self) {
        console::header("REPORTS");
        console::info("1. Inventory  2. Low stock  3. Sales");
        match input::prompt_nonempty("Report").as_str() {
            "1" => println!("{}", inventory_report(&self.warehouse).render()),
            "2" => println!(
                "{}",
                low_stock_report(&self.warehouse, self.config.low_stock_threshold).render()
            ),
            "3" => println!("{}", sales_report(&self.orders).render()),
            _ => console::warning("Unknown report."),
        }
    }

    fn statistics(&self) {
        console::header("STATISTICS");
        let stats = compute_stats(&self.warehouse);

        console::info(&format!(
            "{} SKUs, {} units, total value {}.",
            stats.product_count, stats.total_units, stats.total_value
        ));

        console::info("Units per category:");
        print!("{}", render_bar_chart(&stats.category_units, BAR_CHART_WIDTH));

        console::info("Top products by stock value:");
        for top in &stats.top_by_value {
            console::info(&format!(
                "  {:<12} {:<28} {:>12}",
                top.sku,
                top.name,
                top.stock_value.to_string()
            ));
        }

        console::info("Top products by quantity:");
        for top in &stats.top_by_quantity {
            console::info(&format!(
                "  {:<12} {:<28} {:>8} units",
                top.sku, top.name, top.quantity
            ));
        }

        match &stats.price_range {
            Some(range) => console::info(&format!(
                "Prices: min {}, max {}, average {}.",
                range.min, range.max, range.average
            )),
            None => console::info("Catalog is empty."),
        }

        let health = &stats.stock_health;
        let health_entries = vec![
            ("critical (<=5)".to_string(), health.critical as i64),
            ("low (6-15)".to_string(), health.low as i64),
            ("medium (16-50)".to_string(), health.medium as i64),
            ("high (>50)".to_string(), health.high as i64),
        ];
        console::info("Stock health:");
        print!("{}", render_bar_chart(&health_entries, BAR_CHART_WIDTH));
    }

    // =========================================================================
    // Exports & Backups
    // =========================================================================

    fn exports_menu(&mut self) {
        console::header("EXPORTS");
        console::info("1. Catalog CSV  2. Catalog JSON  3. Inventory report  4. Low stock report");
        console::info("5. Sales report  6. Supplier contacts CSV  7. History JSON");
        console::info("8. List export files  9. Delete export file");
        let result = match input::prompt_nonempty("Export").as_str() {
            "1" => self.exporter.export_products_csv(&self.warehouse),
            "2" => self.exporter.export_products_json(&self.warehouse),
            "3" => self
                .exporter
                .export_report_text("inventory", &inventory_report(&self.warehouse).render()),
            "4" => self.exporter.export_report_text(
                "low_stock",
                &low_stock_report(&self.warehouse, self.config.low_stock_threshold).render(),
            ),
            "5" => self
                .exporter
                .export_report_text("sales", &sales_report(&self.orders).render()),
            "6" => self.exporter.export_supplier_contacts_csv(&self.suppliers),
            "7" => self
                .history
                .to_json()
                .and_then(|json| self.exporter.export_history_json(&json)),
            "8" => {
                match self.exporter.list() {
                    Ok(names) if names.is_empty() => console::info("No exports yet."),
                    Ok(names) => {
                        for name in names {
                            console::info(&name);
                        }
                    }
                    Err(e) => console::error(&e.to_string()),
                }
                return;
            }
            "9" => {
                let name = input::prompt_nonempty("Export file name");
                match self.exporter.delete(&name) {
                    Ok(()) => console::success("Deleted."),
                    Err(e) => console::error(&e.to_string()),
                }
                return;
            }
            _ => {
                console::warning("Unknown export.");
                return;
            }
        };
        match result {
            Ok(path) => {
                console::success(&format!("Written to {}.", path.display()));
                self.history
                    .record(OperationKind::Export, path.display().to_string());
            }
            Err(e) => console::error(&e.to_string()),
        }
    }

    fn backups_menu(&mut self) {
        console::header("BACKUPS");
        console::info("1. Create  2. List  3. Inspect  4. Restore  5. Delete  6. Cleanup");
        match input::prompt_nonempty("Action").as_str() {
            "1" => match self
                .backups
                .create(&self.warehouse, &self.suppliers, &self.orders)
            {
                Ok(backup) => {
                    console::success(&format!(
                        "Backup {} ({} products, {} bytes).",
                        backup.file_name, backup.product_count, backup.size_bytes
                    ));
                    self.history
                        .record(OperationKind::BackupCreated, backup.file_name);
                }
                Err(e) => console::error(&e.to_string()),
            },
            "2" => match self.backups.list() {
                Ok(names) if names.is_empty() => console::info("No backups."),
                Ok(names) => {
                    for name in names {
                        console::info(&name);
                    }
                }
                Err(e) => console::error(&e.to_string()),
            },
            "3" => {
                let name = input::prompt_nonempty("Backup file name");
                match self.backups.inspect(&name) {
                    Ok(info) => console::info(&format!(
                        "{}: version {}, created {}, {} products, {} units, {} bytes",
                        info.file_name,
                        info.version,
                        info.created_at.format("%Y-%m-%d %H:%M UTC"),
                        info.product_count,
                        info.total_units,
                        info.size_bytes
                    )),
                    Err(e) => console::error(&e.to_string()),
                }
            }
            "4" => {
                let name = input::prompt_nonempty("Backup file name");
                if !input::prompt_bool("Replace the current catalog, suppliers, and orders?", false)
                {
                    console::info("Restore cancelled.");
                    return;
                }
                match self.backups.load(&name) {
                    Ok(restored) => {
                        self.warehouse = restored.warehouse;
                        self.suppliers = restored.suppliers;
                        self.orders = restored.orders;
                        console::success(&format!(
                            "Restored {} products, {} suppliers, {} orders from {name}.",
                            self.warehouse.product_count(),
                            self.suppliers.len(),
                            self.orders.len()
                        ));
                        self.history.record(OperationKind::BackupRestored, name);
                    }
                    Err(e) => console::error(&e.to_string()),
                }
            }
            "5" => {
                let name = input::prompt_nonempty("Backup file name");
                match self.backups.delete(&name) {
                    Ok(()) => console::success("Deleted."),
                    Err(e) => console::error(&e.to_string()),
                }
            }
            "6" => match self.backups.cleanup(self.config.backup_keep) {
                Ok(deleted) => console::success(&format!(
                    "Deleted {deleted} old backups; keeping the newest {}.",
                    self.config.backup_keep
                )),
                Err(e) => console::error(&e.to_string()),
            },
            _ => console::warning("Unknown action."),
        }
    }

    // =========================================================================
    // Suppliers
    // =========================================================================

    fn prompt_email(&self) -> String {
        loop {
            let email = input::prompt_nonempty("Contact email");
            match validate_email(&email) {
                Ok(()) => return email,
                Err(e) => console::warning(&e.to_string()),
            }
        }
    }

    fn prompt_phone(&self) -> String {
        loop {
            let phone = input::prompt_nonempty("Phone");
            match validate_phone(&phone) {
                Ok(()) => return phone,
                Err(e) => console::warning(&e.to_string()),
            }
        }
    }

    fn suppliers_menu(&mut self) {
        console::header("SUPPLIERS");
        console::info("1. List  2. Add  3. Link SKU  4. Who supplies a SKU  5. Search  6. Remove");
        match input::prompt_nonempty("Action").as_str() {
            "1" => {
                if self.suppliers.is_empty() {
                    console::info("No suppliers.");
                    return;
                }
                for supplier in self.suppliers.all() {
                    console::info(&format!(
                        "{:<10} {:<20} {:<30} {:<25} {}",
                        supplier.id,
                        supplier.name,
                        supplier.contact_email,
                        supplier.address,
                        supplier.skus.join(", ")
                    ));
                }
                let (count, linked) = self.suppliers.coverage();
                console::info(&format!(
                    "{count} suppliers covering {linked} distinct SKUs."
                ));
            }
            "2" => {
                let name = input::prompt_nonempty("Name");
                let email = self.prompt_email();
                let phone = self.prompt_phone();
                let address = input::prompt_optional("Address").unwrap_or_default();
                let id = self
                    .suppliers
                    .add(Supplier::new(&name, email, phone, address));
                console::success(&format!("Supplier {name} registered as {id}."));
                self.history.record(OperationKind::SupplierAdded, name);
            }
            "3" => {
                let id = input::prompt_nonempty("Supplier id").to_uppercase();
                let sku = self.prompt_sku("SKU");
                if self.warehouse.get(&sku).is_none() {
                    console::warning("SKU is not in the catalog; linking anyway.");
                }
                match self.suppliers.link_sku(&id, &sku) {
                    Ok(()) => console::success(&format!("Linked {sku} to {id}.")),
                    Err(e) => console::error(&e.to_string()),
                }
            }
            "4" => {
                let sku = self.prompt_sku("SKU");
                let hits = self.suppliers.suppliers_for_sku(&sku);
                if hits.is_empty() {
                    console::info("No supplier linked to that SKU.");
                    return;
                }
                let primary_id = hits[0].id.clone();
                for supplier in hits {
                    console::info(&format!("{} ({})", supplier.name, supplier.contact_email));
                }
                let alternatives = self.suppliers.alternatives(&sku, &primary_id);
                if !alternatives.is_empty() {
                    let names: Vec<&str> =
                        alternatives.iter().map(|s| s.name.as_str()).collect();
                    console::info(&format!("Alternatives: {}.", names.join(", ")));
                }
            }
            "5" => {
                let query = input::prompt_nonempty("Search for");
                let hits = self.suppliers.search(&query);
                if hits.is_empty() {
                    console::info("No matches.");
                }
                for supplier in hits {
                    console::info(&format!(
                        "{:<10} {:<20} {}",
                        supplier.id, supplier.name, supplier.address
                    ));
                }
            }
            "6" => {
                let id = input::prompt_nonempty("Supplier id").to_uppercase();
                match self.suppliers.remove(&id) {
                    Ok(removed) => console::success(&format!("Removed {}.", removed.name)),
                    Err(e) => console::error(&e.to_string()),
                }
            }
            _ => console::warning("Unknown action."),
        }
    }

    // =========================================================================
    // Discounts
    // =========================================================================

    fn describe_kind(kind: &DiscountKind) -> String {
        match kind {
            DiscountKind::Percentage { bps } => {
                if bps % 100 == 0 {
                    format!("{}% off", bps / 100)
                } else {
                    format!("{}.{:02}% off", bps / 100, bps % 100)
                }
            }
            DiscountKind::Fixed { amount } => format!("{amount} off"),
        }
    }

    fn prompt_code(&self) -> String {
        loop {
            let code = input::prompt_nonempty("Discount code").to_uppercase();
            match validate_discount_code(&code) {
                Ok(()) => return code,
                Err(e) => console::warning(&e.to_string()),
            }
        }
    }

    fn discounts_menu(&mut self) {
        console::header("DISCOUNTS");
        console::info("1. List  2. Create custom  3. Assign to product  4. Assign to category  5. Toggle active");
        match input::prompt_nonempty("Action").as_str() {
            "1" => {
                for discount in self.pricing.discounts() {
                    let uses = match discount.max_uses {
                        Some(cap) => format!("{}/{cap}", discount.uses),
                        None => discount.uses.to_string(),
                    };
                    console::info(&format!(
                        "{:<20} {:<14} min qty {:<4} uses {:<8} {:<8} {}",
                        discount.code,
                        Self::describe_kind(&discount.kind),
                        discount.min_quantity,
                        uses,
                        if discount.active { "active" } else { "inactive" },
                        discount.description
                    ));
                }
            }
            "2" => {
                let percent = loop {
                    let percent = input::prompt_i64("Percent off (1-100)");
                    match validate_percent_bps(percent * 100) {
                        Ok(()) => break percent,
                        Err(e) => console::warning(&e.to_string()),
                    }
                };
                let description = input::prompt_nonempty("Description");
                let code = self
                    .pricing
                    .create_custom((percent * 100) as u32, description);
                console::success(&format!("Created {code}."));
                self.history.record(OperationKind::DiscountCreated, code);
            }
            "3" => {
                let sku = self.prompt_sku("SKU");
                let code = self.prompt_code();
                match self.pricing.assign_to_product(&sku, &code) {
                    Ok(()) => {
                        console::success(&format!("{code} now applies to {sku}."));
                        self.history
                            .record(OperationKind::DiscountAssigned, format!("{code} -> {sku}"));
                    }
                    Err(e) => console::error(&e.to_string()),
                }
            }
            "4" => {
                let category = input::prompt_nonempty("Category label");
                let code = self.prompt_code();
                match self.pricing.assign_to_category(&category, &code) {
                    Ok(()) => {
                        console::success(&format!("{code} now applies to {category}."));
                        self.history.record(
                            OperationKind::DiscountAssigned,
                            format!("{code} -> {category}"),
                        );
                    }
                    Err(e) => console::error(&e.to_string()),
                }
            }
            "5" => {
                let code = self.prompt_code();
                let currently_active = match self.pricing.get(&code) {
                    Some(discount) => discount.active,
                    None => {
                        console::error(&format!("Discount not found: {code}"));
                        return;
                    }
                };
                let result = if currently_active {
                    self.pricing.deactivate(&code)
                } else {
                    self.pricing.activate(&code)
                };
                match result {
                    Ok(()) => console::success(&format!(
                        "{code} is now {}.",
                        if currently_active { "inactive" } else { "active" }
                    )),
                    Err(e) => console::error(&e.to_string()),
                }
            }
            _ => console::warning("Unknown action."),
        }
    }

    // =========================================================================
    // History & Notifications
    // =========================================================================

    fn history_screen(&self) {
        console::header("HISTORY");
        if self.history.is_empty() {
            console::info("Nothing recorded yet.");
            return;
        }
        for entry in self.history.recent(20) {
            console::info(&format!(
                "{}  {:<10} {:<18} {}",
                entry.at.format("%H:%M:%S"),
                entry.actor,
                entry.kind.label(),
                entry.detail
            ));
        }
        console::info("By kind:");
        for (kind, count) in self.history.counts_by_kind() {
            console::info(&format!("  {:<18} {count}", kind.label()));
        }
    }

    fn notifications_screen(&mut self) {
        console::header("NOTIFICATIONS");
        let today = Utc::now().date_naive();
        let raised = self
            .notifications
            .sweep_low_stock(&self.warehouse, self.config.low_stock_threshold)
            + self
                .notifications
                .sweep_expiry(&self.warehouse, today, self.config.expiry_window_days);
        if raised > 0 {
            console::info(&format!("{raised} new findings from stock sweeps."));
        }

        let unread = self.notifications.unread();
        if unread.is_empty() {
            console::info("No unread notifications.");
            return;
        }
        for notification in unread {
            console::info(&format!(
                "{} [{}] {}",
                notification.at.format("%H:%M:%S"),
                console::severity_tag(notification.severity.label()),
                notification.message
            ));
        }
        if input::prompt_bool("Mark all as read?", true) {
            self.notifications.mark_all_read();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::Money;

    #[test]
    fn test_seeded_order_flow() {
        let mut app = App::new(AppConfig::load().unwrap());
        assert_eq!(app.warehouse.product_count(), 7);

        let mut order = Order::new("Ada");
        order.add_line("FOOD-001", 10).unwrap();
        let total = order.fulfill(&mut app.warehouse).unwrap();
        assert_eq!(total, Money::from_cents(4_550));
        assert_eq!(app.warehouse.get("FOOD-001").unwrap().quantity, 110);
        app.orders.push(order);

        let report = sales_report(&app.orders);
        assert_eq!(report.fulfilled, 1);
        assert_eq!(report.revenue, total);
        assert_eq!(app.suppliers.coverage(), (2, 4));
    }
}
