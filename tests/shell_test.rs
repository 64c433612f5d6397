mod common;

use anyhow::Result;
use common::run_script;
use grocer::cli::ShellOptions;
use tempfile::TempDir;

#[test]
fn test_shell_sale_and_report() -> Result<()> {
    let script = r#"
        product add Oil 100 5
        customer add Abebe 0911
        sell oil Abebe 2
        report
    "#;
    let (ledger, out) = run_script(script, ShellOptions::default())?;

    assert!(out.contains("Added product: Oil (5 in stock at 100.0 birr)"));
    assert!(out.contains("Sold 2 x Oil to Abebe = 200.0 birr (3 left)"));
    assert!(out.contains("Abebe bought 2 x Oil = 200.0 birr\n"));
    assert!(out.contains("Overall Revenue: 200.0 birr"));
    assert_eq!(ledger.find_product("Oil").map(|p| p.stock), Some(3));

    Ok(())
}

#[test]
fn test_shell_reports_errors_and_continues() -> Result<()> {
    let script = r#"
        product add Oil 100 2
        customer add Abebe 0911
        customer add Kebede 0911
        sell Oil Abebe 3
        sell Oil Abebe zero
        sell Coffee Abebe 1
        product add Rice "" 4
        product add Rice abc 4
        product delete 9
        product add Rice 50 -3
        sell Oil 0911 2
    "#;
    let (ledger, out) = run_script(script, ShellOptions::default())?;

    assert!(out.contains("Already registered: Phone already registered: 0911"));
    assert!(out.contains("Not enough stock: "));
    assert!(out.contains("Invalid input: Invalid number for 'quantity'"));
    assert!(out.contains("Not found: Product not found: Coffee"));
    assert!(out.contains("Fill all fields! ('price' is empty)"));
    assert!(out.contains("Invalid input: Invalid number for 'price'"));
    assert!(out.contains("Not found: No products at index 8"));
    assert!(out.contains("Invalid input: Invalid number for 'stock': '-3' (value must not be negative)"));

    // The last line still went through
    assert_eq!(ledger.sales().len(), 1);
    assert_eq!(ledger.customers().len(), 1);

    Ok(())
}

#[test]
fn test_shell_merge_needs_confirmation_in_scripts() -> Result<()> {
    let script = r#"
        product add Rice 50 10
        product add rice 50 5
        product add RICE 50 5 --merge
    "#;
    let (ledger, out) = run_script(script, ShellOptions::default())?;

    assert!(out.contains("Product 'Rice' exists. Add stock? Skipped"));
    assert!(out.contains("Added 5 units to Rice (stock now 15)"));
    assert_eq!(ledger.products().len(), 1);
    assert_eq!(ledger.products()[0].stock, 15);

    Ok(())
}

#[test]
fn test_shell_auto_confirm() -> Result<()> {
    let options = ShellOptions {
        auto_confirm: true,
        ..ShellOptions::default()
    };
    let (ledger, _) = run_script("product add Rice 50 10\nproduct add Rice 50 5\n", options)?;
    assert_eq!(ledger.products()[0].stock, 15);

    Ok(())
}

#[test]
fn test_shell_interactive_confirmation() -> Result<()> {
    let options = ShellOptions {
        interactive: true,
        ..ShellOptions::default()
    };
    let script = "product add Rice 50 10\nproduct add rice 50 5\ny\nproduct add rice 50 1\nno\nquit\n";
    let (ledger, out) = run_script(script, options)?;

    assert!(out.contains("Product 'Rice' exists. Add stock? [y/N] "));
    assert!(out.contains("Product 'Rice' unchanged"));
    assert_eq!(ledger.products()[0].stock, 15);

    Ok(())
}

#[test]
fn test_shell_positional_and_named_selection() -> Result<()> {
    let script = r#"
        product add Rice 50 10
        product add "Olive Oil" 320 4
        product add Sugar 80 4
        product delete 2
        product restock sugar 6
        customer add Abebe 0911
        customer add Almaz 0922
        customer delete 0922
        customer delete 1
        product list
        customer list
    "#;
    let (ledger, out) = run_script(script, ShellOptions::default())?;

    assert!(out.contains("Deleted product: Olive Oil"));
    assert!(out.contains("Added 6 units to Sugar (stock now 10)"));
    assert!(out.contains("Deleted customer: Almaz (0922)"));
    assert!(out.contains("Deleted customer: Abebe (0911)"));
    assert!(out.contains("No customers found."));
    assert_eq!(ledger.product_names(), vec!["Rice", "Sugar"]);

    Ok(())
}

#[test]
fn test_shell_quit_stops_processing() -> Result<()> {
    let (ledger, _) = run_script(
        "product add Rice 50 10\nquit\nproduct add Oil 100 5\n",
        ShellOptions::default(),
    )?;
    assert_eq!(ledger.products().len(), 1);

    Ok(())
}

#[test]
fn test_shell_report_formats() -> Result<()> {
    let script = r#"
        product add Oil 100 5
        customer add Abebe 0911
        sell Oil Abebe 2
        report --format csv
        report --format json
        report --format xml
    "#;
    let (_, out) = run_script(script, ShellOptions::default())?;

    assert!(out.contains("buyer,quantity,product,total\nAbebe,2,Oil,200.0\noverall_revenue,,,200.0\n"));
    assert!(out.contains("\"overall_revenue\": 200.0"));
    assert!(out.contains("Error: Invalid report format 'xml'"));

    Ok(())
}

#[test]
fn test_shell_export_to_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let sales_path = temp_dir.path().join("sales.csv");
    let full_path = temp_dir.path().join("full.json");

    let script = format!(
        "product add Oil 100 5\ncustomer add Abebe 0911\nsell Oil Abebe 2\n\
         export sales -o \"{}\"\nexport full --output \"{}\"\nexport budgets\n",
        sales_path.display(),
        full_path.display()
    );
    let (_, out) = run_script(&script, ShellOptions::default())?;

    assert!(out.contains("Exported 1 sales to "));
    assert!(out.contains("Exported full ledger: 1 products, 1 customers, 1 sales to "));
    assert!(out.contains("invalid value 'budgets'"));

    let csv = std::fs::read_to_string(&sales_path)?;
    assert!(csv.starts_with("product,quantity,total,buyer,recorded_at\nOil,2,200.0,Abebe,"));

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&full_path)?)?;
    assert_eq!(json["products"][0]["stock"], 3);
    assert_eq!(json["revenue"], 200.0);

    Ok(())
}

#[test]
fn test_shell_rejected_export_leaves_file_alone() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("keep.csv");
    std::fs::write(&path, "precious data\n")?;

    let script = format!("export budgets -o \"{}\"\n", path.display());
    let (_, out) = run_script(&script, ShellOptions::default())?;

    assert!(out.contains("invalid value 'budgets'"));
    assert_eq!(std::fs::read_to_string(&path)?, "precious data\n");

    Ok(())
}

#[test]
fn test_shell_selects_numeric_product_names_by_name() -> Result<()> {
    let script = r#"
        product add Rice 50 10
        product add Oil 100 5
        product add 2 10 3
        product restock 2 4
        product delete 2
        product delete 2
    "#;
    let (ledger, out) = run_script(script, ShellOptions::default())?;

    assert!(out.contains("Added 4 units to 2 (stock now 7)"));
    assert!(out.contains("Deleted product: 2"));
    // Once no product is named "2", the number falls back to the listing
    assert!(out.contains("Deleted product: Oil"));
    assert_eq!(ledger.product_names(), vec!["Rice"]);

    Ok(())
}

#[test]
fn test_shell_sell_goes_through_name_lookup() -> Result<()> {
    let script = r#"
        product add Oil 100 5
        customer add Abebe 0911
        sell OIL 0911 2
        sell Oil Nobody 1
    "#;
    let (ledger, out) = run_script(script, ShellOptions::default())?;

    assert!(out.contains("Sold 2 x Oil to Abebe = 200.0 birr (3 left)"));
    assert!(out.contains("Not found: Customer not found: Nobody"));
    assert_eq!(ledger.sales().len(), 1);

    Ok(())
}

#[test]
fn test_shell_help_and_unknown_commands() -> Result<()> {
    let (_, out) = run_script("help\nfly away\n", ShellOptions::default())?;

    assert!(out.contains("product"));
    assert!(out.contains("Sell a product to a customer"));
    assert!(out.contains("unrecognized subcommand 'fly'"));

    Ok(())
}
