use criterion::{black_box, criterion_group, criterion_main, Criterion};
use etherframe::ether::*;
use etherframe::vlan::VlanTag;

static FRAME_BYTES: [u8; 110] = [
    0x00, 0x0b, 0x86, 0x64, 0x8b, 0xa0, 0x00, 0x50, 0x56, 0xae, 0x76, 0xf5, 0x81, 0x00, 0x20, 0x65,
    0x81, 0x00, 0x40, 0xc8, 0x08, 0x00, 0x45, 0x00, 0x00, 0x5e, 0x5c, 0x65, 0x00, 0x00, 0x80, 0x11,
    0x00, 0x00, 0xc0, 0xa8, 0x1d, 0x3a, 0xc0, 0xa8, 0x1d, 0xa0, 0xeb, 0xd8, 0x00, 0xa1, 0x00, 0x4a,
    0xbc, 0x86, 0x30, 0x40, 0x02, 0x01, 0x03, 0x30, 0x0f, 0x02, 0x03, 0x00, 0x91, 0xc8, 0x02, 0x02,
    0x05, 0xdc, 0x04, 0x01, 0x04, 0x02, 0x01, 0x03, 0x04, 0x15, 0x30, 0x13, 0x04, 0x00, 0x02, 0x01,
    0x00, 0x02, 0x01, 0x00, 0x04, 0x05, 0x61, 0x64, 0x6d, 0x69, 0x6e, 0x04, 0x00, 0x04, 0x00, 0x30,
    0x13, 0x04, 0x00, 0x04, 0x00, 0xa0, 0x0d, 0x02, 0x03, 0x00, 0x91, 0xc8, 0x02, 0x01,
];

fn frame_decode(buf: &[u8]) {
    let frame = Frame::decode(buf).unwrap();
    assert!(frame.ether_type == EtherType::IPV4);
    assert!(frame.vlan_tags.len() == 2);
}

pub fn decode(c: &mut Criterion) {
    c.bench_function("frame_decode", |b| {
        b.iter(|| frame_decode(black_box(&FRAME_BYTES[..])))
    });
}

pub fn encode(c: &mut Criterion) {
    let frame = Frame {
        destination: EtherAddr([0x00, 0x0b, 0x86, 0x64, 0x8b, 0xa0]),
        source: EtherAddr([0x00, 0x50, 0x56, 0xae, 0x76, 0xf5]),
        vlan_tags: vec![VlanTag::new(1, false, 101), VlanTag::new(2, false, 200)],
        ether_type: EtherType::IPV4,
        payload: FRAME_BYTES[22..].to_vec().into(),
    };
    assert_eq!(&frame.encode().unwrap()[..], &FRAME_BYTES[..]);

    c.bench_function("frame_encode", |b| {
        let mut buf = Vec::with_capacity(FRAME_BYTES.len());
        b.iter(|| {
            buf.clear();
            black_box(&frame).encode_to(&mut buf).unwrap();
        })
    });
}

criterion_group!(benches, decode, encode);
criterion_main!(benches);
