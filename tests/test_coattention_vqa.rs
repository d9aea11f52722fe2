/*
 * @Author       : 老董
 * @Description  : 协同注意力模型的端到端测试：配置文件、多轮门控记忆与批量前向
 */
use only_vqa::nn::coattention::MemoryState;
use only_vqa::nn::{
    Batch, CoAttentionModel, ForwardMode, ModelKind, Module, VqaConfig, VqaModel,
};
use only_vqa::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn config() -> VqaConfig {
    VqaConfig::from_json_str(
        r#"{
            "img_dim": 4,
            "img_height": 3,
            "img_width": 2,
            "hidden_dim": 6,
            "rnn_size": 3,
            "att_hidden_dim": 5,
            "max_que_length": 4,
            "num_output": 7,
            "ans_vocab_size": 7,
            "att_round": 3,
            "init_bound": 0.1,
            "seed": 11
        }"#,
    )
    .unwrap()
}

fn batch(batch_size: usize, rng: &mut StdRng) -> Batch {
    let mut labels = Tensor::zeros(&[batch_size, 7]);
    for b in 0..batch_size {
        labels[[b, (b * 3) % 7]] = 1.0;
    }
    Batch::new(
        Tensor::new_uniform_with_rng(0.0, 1.0, &[batch_size, 3, 2, 4], rng),
        Tensor::new_uniform_with_rng(-1.0, 1.0, &[batch_size, 4, 3], rng),
        labels,
    )
}

#[test]
fn test_coattention_from_config_file() {
    let config = config();
    let path = std::env::temp_dir().join(format!("only_vqa_coattention_{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    let loaded = VqaConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);

    let a = VqaModel::build(ModelKind::CoAttention, &config).unwrap();
    let b = VqaModel::build(ModelKind::CoAttention, &loaded).unwrap();
    assert_eq!(a.num_elements(), b.num_elements());
    assert_eq!(a.parameter("hidden_W"), b.parameter("hidden_W"));
}

#[test]
fn test_coattention_rounds_and_gates() {
    let config = config();
    let model = CoAttentionModel::build(&config, &mut StdRng::seed_from_u64(config.seed)).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let batch = batch(5, &mut rng);

    let trace = model
        .forward_with_trace(&batch, ForwardMode::Eval, &mut rng)
        .unwrap();
    assert_eq!(trace.gates.len(), 3);
    assert_eq!(trace.gates[0], None);
    for gate in trace.gates[1..].iter().flatten() {
        assert!(gate.abs() <= 1.0);
    }
    assert_eq!(trace.final_step.img_weights.shape(), &[5, 6]);
    assert_eq!(trace.final_step.que_weights.shape(), &[5, 4]);
    assert_eq!(trace.final_step.affinity.shape(), &[5, 6, 4]);
    assert!(trace.output.loss.is_finite());
    assert!(trace.output.logits.to_vec().iter().all(|&x| x >= 0.0));
}

#[test]
fn test_coattention_memory_walkthrough() {
    let config = config();
    let model = CoAttentionModel::build(&config, &mut StdRng::seed_from_u64(config.seed)).unwrap();
    let p = model.params();
    let mut rng = StdRng::seed_from_u64(4);
    let batch = batch(2, &mut rng);
    let img = batch.image.reshape(&[2, 6, 4]);

    let mut step = only_vqa::nn::coattention::initial_attention(p, &img, &batch.question);
    let mut memory = MemoryState::Uninitialized;
    for _ in 0..config.att_round {
        memory = memory.update(p, &step);
        let hidden = memory.affinity().unwrap().clone();
        step = only_vqa::nn::coattention::refined_attention(p, &step.img_grid, &step.que_grid, &hidden);
    }
    let trace = model
        .forward_with_trace(&batch, ForwardMode::Eval, &mut rng)
        .unwrap();
    approx::assert_abs_diff_eq!(trace.final_step.img_attention, step.img_attention, epsilon = 1e-6);
}

#[test]
fn test_coattention_train_mode_batches() {
    let config = config();
    let model = VqaModel::build(ModelKind::CoAttention, &config).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    for batch_size in [1, 3, 8] {
        let batch = batch(batch_size, &mut rng);
        let output = model.forward(&batch, ForwardMode::Train, &mut rng).unwrap();
        assert_eq!(output.predictions.len(), batch_size);
        assert_eq!(output.probabilities.shape(), &[batch_size, 7]);
    }
}
