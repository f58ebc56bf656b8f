//! 加密 TradeInfo 并计算 TradeSha, 再模拟收到回传后校验并解密
//!
//! cargo run -p spgateway --example trade_info

use spgateway::logging;
use spgateway::{Settings, TradeInfo};

fn main() -> anyhow::Result<()> {
    let settings = Settings::builder()
        .add_dotenv()
        .set_default("spgateway.merchant_id", "3430112")?
        .set_default("spgateway.hash_key", "12345678901234567890123456789012")?
        .set_default("spgateway.hash_iv", "1234567890123456")?
        .add_environment()
        .build()?;

    logging::init(&settings.logging)?;

    let store = settings.store();

    let info = TradeInfo {
        respond_type: "JSON".to_string(),
        time_stamp: "1485232229".to_string(),
        version: "1.4".to_string(),
        merchant_order_no: "S_1485232229".to_string(),
        amt: 40,
        item_desc: "UnitTest".to_string(),
        ..Default::default()
    };

    let trade_info = store.encrypt_trade_info(&info)?;
    let trade_sha = store.trade_sha(&trade_info);

    println!("TradeInfo: {}", trade_info);
    println!("TradeSha: {}", trade_sha);

    if !store.verify_trade_sha(&trade_info, &trade_sha) {
        anyhow::bail!("TradeSha 校验失败");
    }

    let fields = store.decrypt_trade_info_fields(&trade_info)?;
    for (key, value) in fields.iter() {
        println!("{:>16} = {}", key, value);
    }

    Ok(())
}
